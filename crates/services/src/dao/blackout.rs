use bson::{DateTime, doc, oid::ObjectId};
use lakehouse_db::models::{BlackoutPeriod, DateRange};
use mongodb::Database;

use super::base::{BaseDao, DaoResult};

pub struct BlackoutDao {
    pub base: BaseDao<BlackoutPeriod>,
}

impl BlackoutDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, BlackoutPeriod::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        listing_id: ObjectId,
        range: DateRange,
        reason: Option<String>,
        created_by: ObjectId,
    ) -> DaoResult<BlackoutPeriod> {
        let blackout = BlackoutPeriod {
            id: None,
            listing_id,
            range,
            reason,
            created_by,
            created_at: DateTime::now(),
        };

        let id = self.base.insert_one(&blackout).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find_for_listing(
        &self,
        listing_id: ObjectId,
    ) -> DaoResult<Vec<BlackoutPeriod>> {
        self.base
            .find_many(
                doc! { "listing_id": listing_id },
                Some(doc! { "range.start": 1 }),
            )
            .await
    }

    pub async fn delete_by_id(&self, id: ObjectId) -> DaoResult<u64> {
        self.base.hard_delete(doc! { "_id": id }).await
    }
}
