use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Identity and privilege record. Accounts are invite-only, so every family
/// profile links back to the invitation that created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
    pub password_hash: String,
    pub invited_by: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    #[default]
    Family,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Family => "family",
        }
    }
}

impl Profile {
    pub const COLLECTION: &'static str = "profiles";

    /// Owners approve/deny bookings, manage blackouts and issue invitations.
    pub fn is_privileged(&self) -> bool {
        self.role == Role::Owner
    }
}
