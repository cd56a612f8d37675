use bson::{DateTime, doc, oid::ObjectId};
use chrono::{Duration, Utc};
use lakehouse_db::models::{Invitation, InvitationStatus};
use mongodb::Database;

use super::base::{BaseDao, DaoResult};

pub struct InvitationDao {
    pub base: BaseDao<Invitation>,
}

impl InvitationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Invitation::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        email: String,
        full_name: String,
        token: String,
        inviter_id: ObjectId,
        inviter_name: String,
    ) -> DaoResult<Invitation> {
        let now = Utc::now();
        let invitation = Invitation {
            id: None,
            email,
            full_name,
            token,
            inviter_id,
            inviter_name,
            status: InvitationStatus::Pending,
            created_at: DateTime::from_chrono(now),
            expires_at: DateTime::from_chrono(now + Duration::days(Invitation::TTL_DAYS)),
            accepted_at: None,
            accepted_by: None,
        };

        let id = self.base.insert_one(&invitation).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find_pending_by_email(&self, email: &str) -> DaoResult<Option<Invitation>> {
        self.base
            .find_one(doc! { "email": email, "status": "pending" })
            .await
    }

    pub async fn find_by_token(&self, token: &str) -> DaoResult<Option<Invitation>> {
        self.base.find_one(doc! { "token": token }).await
    }

    pub async fn find_pending_by_token(&self, token: &str) -> DaoResult<Option<Invitation>> {
        self.base
            .find_one(doc! { "token": token, "status": "pending" })
            .await
    }

    /// Expiry is written back lazily at resolve time. The pending
    /// precondition keeps a concurrent accept from being clobbered.
    pub async fn mark_expired(&self, id: ObjectId) -> DaoResult<bool> {
        self.base
            .update_one(
                doc! { "_id": id, "status": "pending" },
                doc! { "$set": { "status": "expired" } },
            )
            .await
    }

    /// Compare-and-set on pending status: of two concurrent accepts, only
    /// one consumes the invitation.
    pub async fn mark_accepted(&self, id: ObjectId, profile_id: ObjectId) -> DaoResult<bool> {
        self.base
            .update_one(
                doc! { "_id": id, "status": "pending" },
                doc! { "$set": {
                    "status": "accepted",
                    "accepted_at": DateTime::now(),
                    "accepted_by": profile_id,
                } },
            )
            .await
    }

    pub async fn list_pending(&self) -> DaoResult<Vec<Invitation>> {
        self.base
            .find_many(doc! { "status": "pending" }, Some(doc! { "created_at": -1 }))
            .await
    }

    pub async fn delete_by_id(&self, id: ObjectId) -> DaoResult<u64> {
        self.base.hard_delete(doc! { "_id": id }).await
    }
}
