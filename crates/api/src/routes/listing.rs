use axum::{
    Json,
    extract::{Path, Query, State},
};
use bson::oid::ObjectId;
use chrono::{NaiveDate, Utc};
use lakehouse_db::models::DateRange;
use lakehouse_services::availability::AvailabilityReport;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub max_guests: u32,
    pub min_nights: u32,
}

pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(listing_id): Path<String>,
) -> Result<Json<ListingResponse>, ApiError> {
    let lid = ObjectId::parse_str(&listing_id)
        .map_err(|_| ApiError::BadRequest("Invalid listing_id".to_string()))?;

    let listing = state.listings.base.find_by_id(lid).await?;

    Ok(Json(ListingResponse {
        id: listing.id.unwrap().to_hex(),
        name: listing.name,
        description: listing.description,
        max_guests: listing.max_guests,
        min_nights: listing.min_nights,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

pub async fn availability(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(listing_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityReport>, ApiError> {
    let lid = ObjectId::parse_str(&listing_id)
        .map_err(|_| ApiError::BadRequest("Invalid listing_id".to_string()))?;

    // 404 for unknown listings rather than an empty "available" report
    state.listings.base.find_by_id(lid).await?;

    let today = Utc::now().date_naive();
    let report = state
        .availability
        .check(lid, DateRange::new(query.start, query.end), today)
        .await?;

    Ok(Json(report))
}
