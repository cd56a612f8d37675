use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::range::DateRange;

/// An owner-declared unavailable period. Carries no status: existence alone
/// removes the range from availability, and deletion is a hard delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackoutPeriod {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub listing_id: ObjectId,
    pub range: DateRange,
    pub reason: Option<String>,
    pub created_by: ObjectId,
    pub created_at: DateTime,
}

impl BlackoutPeriod {
    pub const COLLECTION: &'static str = "blackout_periods";
}
