use bson::{DateTime, doc, oid::ObjectId};
use lakehouse_db::models::{Profile, Role};
use mongodb::Database;

use super::base::{BaseDao, DaoResult};

pub struct ProfileDao {
    pub base: BaseDao<Profile>,
}

impl ProfileDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Profile::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        email: String,
        full_name: String,
        role: Role,
        password_hash: String,
        invited_by: Option<ObjectId>,
    ) -> DaoResult<Profile> {
        let now = DateTime::now();
        let profile = Profile {
            id: None,
            email,
            full_name,
            role,
            password_hash,
            invited_by,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&profile).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> DaoResult<Option<Profile>> {
        self.base.find_one(doc! { "email": email }).await
    }

    /// Privilege check for approve/deny/cancel-as-owner, blackout management
    /// and invitation issuance. Unknown actors are simply not privileged.
    pub async fn is_privileged(&self, user_id: ObjectId) -> DaoResult<bool> {
        Ok(self
            .base
            .find_one(doc! { "_id": user_id })
            .await?
            .is_some_and(|p| p.is_privileged()))
    }

    pub async fn owner_emails(&self) -> DaoResult<Vec<String>> {
        let owners = self
            .base
            .find_many(doc! { "role": Role::Owner.as_str() }, None)
            .await?;
        Ok(owners.into_iter().map(|p| p.email).collect())
    }
}
