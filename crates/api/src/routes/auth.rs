use axum::{Json, extract::State};
use bson::oid::ObjectId;
use lakehouse_db::models::Profile;
use lakehouse_services::auth::TokenPair;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.unwrap().to_hex(),
            email: profile.email,
            full_name: profile.full_name,
            role: profile.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub profile: ProfileResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let profile = state
        .profiles
        .find_by_email(&body.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if !state
        .auth
        .verify_password(&body.password, &profile.password_hash)?
    {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let tokens = state
        .auth
        .generate_tokens(profile.id.unwrap(), &profile.email)?;

    Ok(Json(AuthResponse {
        profile: profile.into(),
        tokens,
    }))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let claims = state.auth.verify_refresh_token(&body.refresh_token)?;
    let profile_id = ObjectId::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid profile ID in token".to_string()))?;

    let profile = state.profiles.base.find_by_id(profile_id).await?;
    let tokens = state
        .auth
        .generate_tokens(profile.id.unwrap(), &profile.email)?;

    Ok(Json(AuthResponse {
        profile: profile.into(),
        tokens,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profiles.base.find_by_id(auth.profile_id).await?;
    Ok(Json(profile.into()))
}
