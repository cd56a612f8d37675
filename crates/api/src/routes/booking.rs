use axum::{
    Json,
    extract::{Path, Query, State},
};
use bson::oid::ObjectId;
use chrono::NaiveDate;
use lakehouse_db::models::{Booking, BookingStatus, DateRange};
use serde::{Deserialize, Serialize};

use super::rfc3339;
use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub listing_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub guests: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub listing_id: String,
    pub user_id: String,
    pub range: DateRange,
    pub guests: u32,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
    pub approved_at: Option<String>,
    pub denied_at: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancelled_by: Option<String>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.unwrap().to_hex(),
            listing_id: booking.listing_id.to_hex(),
            user_id: booking.user_id.to_hex(),
            range: booking.range,
            guests: booking.guests,
            notes: booking.notes,
            status: booking.status.as_str().to_string(),
            created_at: rfc3339(booking.created_at),
            approved_at: booking.approved_at.map(rfc3339),
            denied_at: booking.denied_at.map(rfc3339),
            cancelled_at: booking.cancelled_at.map(rfc3339),
            cancelled_by: booking.cancelled_by.map(|id| id.to_hex()),
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let listing_id = ObjectId::parse_str(&body.listing_id)
        .map_err(|_| ApiError::BadRequest("Invalid listing_id".to_string()))?;

    let booking = state
        .bookings
        .create(
            listing_id,
            auth.profile_id,
            DateRange::new(body.start, body.end),
            body.guests,
            body.notes,
        )
        .await?;

    Ok(Json(booking.into()))
}

pub async fn list_own(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = state.bookings.find_own(auth.profile_id).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let bid = parse_booking_id(&booking_id)?;
    let booking = state.bookings.get(bid, auth.profile_id).await?;
    Ok(Json(booking.into()))
}

pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let bid = parse_booking_id(&booking_id)?;
    let booking = state.bookings.approve(bid, auth.profile_id).await?;
    Ok(Json(booking.into()))
}

pub async fn deny(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let bid = parse_booking_id(&booking_id)?;
    let booking = state.bookings.deny(bid, auth.profile_id).await?;
    Ok(Json(booking.into()))
}

pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let bid = parse_booking_id(&booking_id)?;
    let booking = state.bookings.cancel(bid, auth.profile_id).await?;
    Ok(Json(booking.into()))
}

#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    pub status: Option<String>,
}

/// The owner's review queue; defaults to pending requests.
pub async fn queue(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<QueueQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let status = match query.status.as_deref() {
        None => BookingStatus::Pending,
        Some(s) => BookingStatus::parse(s)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown status: {s}")))?,
    };

    let bookings = state.bookings.list_by_status(auth.profile_id, status).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

fn parse_booking_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid booking_id".to_string()))
}
