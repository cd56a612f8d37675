use bson::oid::ObjectId;
use lakehouse_db::models::{BlackoutPeriod, DateRange};
use std::sync::Arc;

use crate::dao::{blackout::BlackoutDao, profile::ProfileDao};
use crate::error::{ServiceError, ServiceResult};

/// Owner-declared unavailable periods. Unlike bookings these have no
/// lifecycle: creation removes the range from availability, deletion is a
/// hard delete and nothing of the period survives it.
pub struct BlackoutService {
    blackouts: Arc<BlackoutDao>,
    profiles: Arc<ProfileDao>,
}

impl BlackoutService {
    pub fn new(blackouts: Arc<BlackoutDao>, profiles: Arc<ProfileDao>) -> Self {
        Self { blackouts, profiles }
    }

    /// Past ranges are allowed here: the owner may record a closure that
    /// already happened. Only ordering is enforced.
    pub async fn create(
        &self,
        listing_id: ObjectId,
        range: DateRange,
        reason: Option<String>,
        actor_id: ObjectId,
    ) -> ServiceResult<BlackoutPeriod> {
        self.require_owner(actor_id).await?;
        if !range.is_ordered() {
            return Err(ServiceError::Validation(
                "End date must be after start date".to_string(),
            ));
        }
        Ok(self
            .blackouts
            .create(listing_id, range, reason, actor_id)
            .await?)
    }

    pub async fn delete(&self, blackout_id: ObjectId, actor_id: ObjectId) -> ServiceResult<()> {
        self.require_owner(actor_id).await?;
        let deleted = self.blackouts.delete_by_id(blackout_id).await?;
        if deleted == 0 {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    pub async fn list(&self, listing_id: ObjectId) -> ServiceResult<Vec<BlackoutPeriod>> {
        Ok(self.blackouts.find_for_listing(listing_id).await?)
    }

    async fn require_owner(&self, actor_id: ObjectId) -> ServiceResult<()> {
        if self.profiles.is_privileged(actor_id).await? {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(
                "Only owners can manage blackout dates".to_string(),
            ))
        }
    }
}
