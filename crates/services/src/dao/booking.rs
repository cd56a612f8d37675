use bson::{DateTime, Document, doc, oid::ObjectId};
use lakehouse_db::models::{Booking, BookingStatus, DateRange};
use mongodb::Database;

use super::base::{BaseDao, DaoResult};

pub struct BookingDao {
    pub base: BaseDao<Booking>,
}

impl BookingDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Booking::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        listing_id: ObjectId,
        user_id: ObjectId,
        range: DateRange,
        guests: u32,
        notes: Option<String>,
    ) -> DaoResult<Booking> {
        let booking = Booking {
            id: None,
            listing_id,
            user_id,
            range,
            guests,
            notes,
            status: BookingStatus::Pending,
            created_at: DateTime::now(),
            approved_at: None,
            denied_at: None,
            cancelled_at: None,
            cancelled_by: None,
        };

        let id = self.base.insert_one(&booking).await?;
        self.base.find_by_id(id).await
    }

    /// Bookings that currently occupy their date range: approved ones plus
    /// pending ones, which count as a soft hold.
    pub async fn find_holds(&self, listing_id: ObjectId) -> DaoResult<Vec<Booking>> {
        self.base
            .find_many(
                doc! {
                    "listing_id": listing_id,
                    "status": { "$in": ["pending", "approved"] },
                },
                None,
            )
            .await
    }

    pub async fn find_by_user(&self, user_id: ObjectId) -> DaoResult<Vec<Booking>> {
        self.base
            .find_many(doc! { "user_id": user_id }, Some(doc! { "range.start": 1 }))
            .await
    }

    pub async fn find_by_status(&self, status: BookingStatus) -> DaoResult<Vec<Booking>> {
        self.base
            .find_many(
                doc! { "status": status.as_str() },
                Some(doc! { "created_at": -1 }),
            )
            .await
    }

    /// Compare-and-set transition: the `$set` is applied only while the
    /// stored status still equals `expected`. Returns false when the status
    /// moved since it was read, so concurrent transitions cannot both win.
    pub async fn transition(
        &self,
        id: ObjectId,
        expected: BookingStatus,
        set: Document,
    ) -> DaoResult<bool> {
        self.base
            .update_one(
                doc! { "_id": id, "status": expected.as_str() },
                doc! { "$set": set },
            )
            .await
    }
}
