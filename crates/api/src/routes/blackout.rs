use axum::{
    Json,
    extract::{Path, State},
};
use bson::oid::ObjectId;
use chrono::NaiveDate;
use lakehouse_db::models::{BlackoutPeriod, DateRange};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateBlackoutRequest {
    pub listing_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlackoutResponse {
    pub id: String,
    pub listing_id: String,
    pub range: DateRange,
    pub reason: Option<String>,
}

impl From<BlackoutPeriod> for BlackoutResponse {
    fn from(blackout: BlackoutPeriod) -> Self {
        Self {
            id: blackout.id.unwrap().to_hex(),
            listing_id: blackout.listing_id.to_hex(),
            range: blackout.range,
            reason: blackout.reason,
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateBlackoutRequest>,
) -> Result<Json<BlackoutResponse>, ApiError> {
    let listing_id = ObjectId::parse_str(&body.listing_id)
        .map_err(|_| ApiError::BadRequest("Invalid listing_id".to_string()))?;

    let blackout = state
        .blackouts
        .create(
            listing_id,
            DateRange::new(body.start, body.end),
            body.reason,
            auth.profile_id,
        )
        .await?;

    Ok(Json(blackout.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(blackout_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let bid = ObjectId::parse_str(&blackout_id)
        .map_err(|_| ApiError::BadRequest("Invalid blackout_id".to_string()))?;

    state.blackouts.delete(bid, auth.profile_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(listing_id): Path<String>,
) -> Result<Json<Vec<BlackoutResponse>>, ApiError> {
    let lid = ObjectId::parse_str(&listing_id)
        .map_err(|_| ApiError::BadRequest("Invalid listing_id".to_string()))?;

    let blackouts = state.blackouts.list(lid).await?;
    Ok(Json(blackouts.into_iter().map(Into::into).collect()))
}
