use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A single-use invitation gating account creation. At most one pending
/// invitation may exist per email, and a token resolves to exactly one
/// invitation while pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub full_name: String,
    pub token: String,
    pub inviter_id: ObjectId,
    pub inviter_name: String,
    #[serde(default)]
    pub status: InvitationStatus,
    pub created_at: DateTime,
    pub expires_at: DateTime,
    pub accepted_at: Option<DateTime>,
    pub accepted_by: Option<ObjectId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    #[default]
    Pending,
    Accepted,
    Expired,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Expired => "expired",
        }
    }
}

impl Invitation {
    pub const COLLECTION: &'static str = "invitations";

    /// Invitations expire 7 days after creation.
    pub const TTL_DAYS: i64 = 7;
}
