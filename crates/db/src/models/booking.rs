use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::range::DateRange;

/// A stay request. The range is immutable once created; the correction path
/// is cancel-and-recreate. Bookings are never physically deleted, so the
/// full request history survives as an audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub listing_id: ObjectId,
    pub user_id: ObjectId,
    pub range: DateRange,
    pub guests: u32,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    pub created_at: DateTime,
    pub approved_at: Option<DateTime>,
    pub denied_at: Option<DateTime>,
    pub cancelled_at: Option<DateTime>,
    pub cancelled_by: Option<ObjectId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Denied,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Denied => "denied",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "approved" => Some(BookingStatus::Approved),
            "denied" => Some(BookingStatus::Denied),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Denied and cancelled bookings never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Denied | BookingStatus::Cancelled)
    }

    /// Legal transitions: pending -> approved | denied | cancelled,
    /// approved -> cancelled. Nothing ever returns to pending.
    pub fn can_become(&self, next: BookingStatus) -> bool {
        matches!(
            (*self, next),
            (BookingStatus::Pending, BookingStatus::Approved)
                | (BookingStatus::Pending, BookingStatus::Denied)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Approved, BookingStatus::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Booking {
    pub const COLLECTION: &'static str = "bookings";
}
