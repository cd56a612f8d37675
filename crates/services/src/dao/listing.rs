use bson::DateTime;
use lakehouse_db::models::Listing;
use mongodb::Database;

use super::base::{BaseDao, DaoResult};

pub struct ListingDao {
    pub base: BaseDao<Listing>,
}

impl ListingDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Listing::COLLECTION),
        }
    }

    /// Listings are seeded out of band (setup scripts, test fixtures); no
    /// HTTP surface mutates them.
    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        max_guests: u32,
        min_nights: u32,
    ) -> DaoResult<Listing> {
        let listing = Listing {
            id: None,
            name,
            description,
            max_guests,
            min_nights,
            created_at: DateTime::now(),
        };

        let id = self.base.insert_one(&listing).await?;
        self.base.find_by_id(id).await
    }
}
