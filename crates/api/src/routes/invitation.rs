use axum::{
    Json,
    extract::{Path, State},
};
use bson::oid::ObjectId;
use lakehouse_db::models::Invitation;
use lakehouse_services::auth::TokenPair;
use serde::{Deserialize, Serialize};

use super::auth::ProfileResponse;
use super::rfc3339;
use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateInvitationRequest {
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct InvitationResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub status: String,
    pub inviter_name: String,
    /// Returned to owners so the invite link can be re-shared manually if
    /// the email goes missing.
    pub token: String,
    pub created_at: String,
    pub expires_at: String,
}

impl From<Invitation> for InvitationResponse {
    fn from(invitation: Invitation) -> Self {
        Self {
            id: invitation.id.unwrap().to_hex(),
            email: invitation.email,
            full_name: invitation.full_name,
            status: invitation.status.as_str().to_string(),
            inviter_name: invitation.inviter_name,
            token: invitation.token,
            created_at: rfc3339(invitation.created_at),
            expires_at: rfc3339(invitation.expires_at),
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateInvitationRequest>,
) -> Result<Json<InvitationResponse>, ApiError> {
    let invitation = state
        .invitations
        .create(body.email, body.full_name, auth.profile_id)
        .await?;

    Ok(Json(invitation.into()))
}

pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<InvitationResponse>>, ApiError> {
    let invitations = state.invitations.list_pending(auth.profile_id).await?;
    Ok(Json(invitations.into_iter().map(Into::into).collect()))
}

pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invitation_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let iid = ObjectId::parse_str(&invitation_id)
        .map_err(|_| ApiError::BadRequest("Invalid invitation_id".to_string()))?;

    state.invitations.cancel(iid, auth.profile_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// What an invitee sees before accepting. Public, but reveals nothing
/// beyond what the invite email already contained.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub email: String,
    pub full_name: String,
    pub inviter_name: String,
    pub expires_at: String,
}

pub async fn validate(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let invitation = state.invitations.resolve(&token).await?;

    Ok(Json(ValidateResponse {
        email: invitation.email,
        full_name: invitation.full_name,
        inviter_name: invitation.inviter_name,
        expires_at: rfc3339(invitation.expires_at),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AcceptResponse {
    pub profile: ProfileResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

pub async fn accept(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<AcceptRequest>,
) -> Result<Json<AcceptResponse>, ApiError> {
    let (profile, tokens) = state.invitations.accept(&token, &body.password).await?;

    Ok(Json(AcceptResponse {
        profile: profile.into(),
        tokens,
    }))
}
