use bson::oid::ObjectId;
use chrono::NaiveDate;
use lakehouse_db::models::{BlackoutPeriod, Booking, DateRange};
use serde::Serialize;
use std::sync::Arc;

use crate::dao::{blackout::BlackoutDao, booking::BookingDao};
use crate::error::{ServiceError, ServiceResult};

/// A conflicting entity, reported by kind and range only. Internal ids stay
/// internal; the range is what a caller can show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub range: DateRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Booking,
    Blackout,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReport {
    pub available: bool,
    pub conflicts: Vec<Conflict>,
}

/// Tests the candidate against every hold and blackout instead of
/// short-circuiting on the first hit, so the caller can report *why* the
/// dates are unavailable.
pub fn collect_conflicts(
    holds: &[Booking],
    blackouts: &[BlackoutPeriod],
    candidate: DateRange,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for booking in holds {
        if booking.range.overlaps(&candidate) {
            conflicts.push(Conflict {
                kind: ConflictKind::Booking,
                range: booking.range,
            });
        }
    }
    for blackout in blackouts {
        if blackout.range.overlaps(&candidate) {
            conflicts.push(Conflict {
                kind: ConflictKind::Blackout,
                range: blackout.range,
            });
        }
    }

    conflicts
}

/// Read-only availability checks. Safe to call repeatedly and concurrently;
/// writes nothing.
#[derive(Clone)]
pub struct AvailabilityService {
    bookings: Arc<BookingDao>,
    blackouts: Arc<BlackoutDao>,
}

impl AvailabilityService {
    pub fn new(bookings: Arc<BookingDao>, blackouts: Arc<BlackoutDao>) -> Self {
        Self { bookings, blackouts }
    }

    /// Input constraints shared by availability checks and booking creation:
    /// at least one night, starting today or later.
    pub fn validate_range(range: DateRange, today: NaiveDate) -> ServiceResult<()> {
        if !range.is_ordered() {
            return Err(ServiceError::Validation(
                "End date must be after start date".to_string(),
            ));
        }
        if range.start < today {
            return Err(ServiceError::Validation(
                "Start date cannot be in the past".to_string(),
            ));
        }
        Ok(())
    }

    /// Pending bookings count as a soft hold: two simultaneous requesters
    /// must not both be told "available" for the same dates, at the cost of
    /// rejecting requests that might ultimately be denied.
    pub async fn check(
        &self,
        listing_id: ObjectId,
        candidate: DateRange,
        today: NaiveDate,
    ) -> ServiceResult<AvailabilityReport> {
        Self::validate_range(candidate, today)?;

        let holds = self.bookings.find_holds(listing_id).await?;
        let blackouts = self.blackouts.find_for_listing(listing_id).await?;
        let conflicts = collect_conflicts(&holds, &blackouts, candidate);

        Ok(AvailabilityReport {
            available: conflicts.is_empty(),
            conflicts,
        })
    }
}
