use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// The shared property. Read-mostly reference data: the engine treats it as
/// immutable input and exposes no mutation API for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: Option<String>,
    pub max_guests: u32,
    pub min_nights: u32,
    pub created_at: DateTime,
}

impl Listing {
    pub const COLLECTION: &'static str = "listings";
}
