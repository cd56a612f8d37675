use bson::{DateTime, doc, oid::ObjectId};
use lakehouse_db::models::{Invitation, InvitationStatus, Profile, Role};
use rand::RngCore;
use std::sync::Arc;
use validator::ValidateEmail;

use crate::auth::{AuthService, TokenPair};
use crate::dao::{invitation::InvitationDao, profile::ProfileDao};
use crate::error::{ServiceError, ServiceResult};
use crate::notify::{NotificationDispatcher, NotificationIntent};

/// What the caller sees when an accept loses its final compare-and-set. A
/// concurrent accept reads as already-accepted; anything else (the row was
/// lazily expired or cancelled out from under us) as invalid-or-expired.
fn lost_accept_error(status: Option<InvitationStatus>) -> ServiceError {
    match status {
        Some(InvitationStatus::Accepted) => ServiceError::AlreadyAccepted,
        _ => ServiceError::InvalidOrExpired,
    }
}

/// 256-bit random token, hex-encoded. The value is the only credential an
/// invitee holds, so it comes straight from the OS RNG.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Issues, resolves and redeems the single-use tokens that gate account
/// creation. Independent of bookings; shares only the profile store.
pub struct InvitationService {
    invitations: Arc<InvitationDao>,
    profiles: Arc<ProfileDao>,
    auth: Arc<AuthService>,
    dispatcher: NotificationDispatcher,
    site_url: String,
}

impl InvitationService {
    pub fn new(
        invitations: Arc<InvitationDao>,
        profiles: Arc<ProfileDao>,
        auth: Arc<AuthService>,
        dispatcher: NotificationDispatcher,
        site_url: String,
    ) -> Self {
        Self {
            invitations,
            profiles,
            auth,
            dispatcher,
            site_url,
        }
    }

    pub async fn create(
        &self,
        email: String,
        full_name: String,
        inviter_id: ObjectId,
    ) -> ServiceResult<Invitation> {
        let inviter = self.profiles.base.find_by_id(inviter_id).await?;
        if !inviter.is_privileged() {
            return Err(ServiceError::PermissionDenied(
                "Only owners can invite new members".to_string(),
            ));
        }

        if !email.validate_email() {
            return Err(ServiceError::Validation("Invalid email address".to_string()));
        }
        if full_name.trim().is_empty() {
            return Err(ServiceError::Validation("Full name is required".to_string()));
        }
        if self.profiles.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Validation(
                "This email already has an account".to_string(),
            ));
        }
        if self
            .invitations
            .find_pending_by_email(&email)
            .await?
            .is_some()
        {
            return Err(ServiceError::DuplicatePendingInvite);
        }

        let token = generate_token();
        let invitation = self
            .invitations
            .create(
                email,
                full_name,
                token,
                inviter_id,
                inviter.full_name.clone(),
            )
            .await?;

        self.dispatcher
            .dispatch(vec![NotificationIntent::InvitationCreated {
                to: invitation.email.clone(),
                full_name: invitation.full_name.clone(),
                inviter_name: invitation.inviter_name.clone(),
                invite_url: format!(
                    "{}/auth/accept-invite?token={}",
                    self.site_url, invitation.token
                ),
            }]);

        Ok(invitation)
    }

    /// Looks up a pending invitation by token. Expiry is lazy: resolving a
    /// pending invitation past its `expires_at` writes `expired` back as a
    /// query-time side effect, so reads of this collection are not always
    /// pure. Resolving again afterwards still reports invalid-or-expired;
    /// an invitation is never resurrected to pending.
    pub async fn resolve(&self, token: &str) -> ServiceResult<Invitation> {
        let Some(invitation) = self.invitations.find_pending_by_token(token).await? else {
            return Err(ServiceError::InvalidOrExpired);
        };

        if invitation.expires_at < DateTime::now() {
            self.invitations
                .mark_expired(invitation.id.unwrap())
                .await?;
            return Err(ServiceError::InvalidOrExpired);
        }

        Ok(invitation)
    }

    /// Redeems the token: creates the invitee's profile with the default
    /// non-privileged role and marks the invitation accepted, then signs the
    /// new member in. Accepting an already-accepted token fails with
    /// `AlreadyAccepted` rather than creating a duplicate profile.
    pub async fn accept(
        &self,
        token: &str,
        password: &str,
    ) -> ServiceResult<(Profile, TokenPair)> {
        if password.len() < 8 {
            return Err(ServiceError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        // Distinguish a consumed token from a bad one.
        if let Some(existing) = self.invitations.find_by_token(token).await? {
            if existing.status == InvitationStatus::Accepted {
                return Err(ServiceError::AlreadyAccepted);
            }
        }

        let invitation = self.resolve(token).await?;

        let password_hash = self.auth.hash_password(password)?;
        let profile = self
            .profiles
            .create(
                invitation.email.clone(),
                invitation.full_name.clone(),
                Role::Family,
                password_hash,
                Some(invitation.inviter_id),
            )
            .await
            .map_err(|err| match err {
                // Unique email index: a concurrent accept of the same token
                // already created the profile.
                crate::dao::base::DaoError::DuplicateKey(_) => ServiceError::AlreadyAccepted,
                other => other.into(),
            })?;

        let claimed = self
            .invitations
            .mark_accepted(invitation.id.unwrap(), profile.id.unwrap())
            .await?;
        if !claimed {
            // Lost the race: the invitation moved on between resolve and
            // the compare-and-set (a concurrent accept, a lazy expiry, or a
            // cancellation). Remove the profile created above so a failed
            // accept leaves nothing behind.
            let current = self.invitations.find_by_token(token).await?;
            self.profiles
                .base
                .hard_delete(doc! { "_id": profile.id.unwrap() })
                .await?;
            return Err(lost_accept_error(current.map(|i| i.status)));
        }

        let tokens = self
            .auth
            .generate_tokens(profile.id.unwrap(), &profile.email)?;
        Ok((profile, tokens))
    }

    /// Hard delete, any status. Cancellation is the one path that removes an
    /// invitation instead of transitioning it.
    pub async fn cancel(&self, invitation_id: ObjectId, actor_id: ObjectId) -> ServiceResult<()> {
        self.require_owner(actor_id).await?;
        let deleted = self.invitations.delete_by_id(invitation_id).await?;
        if deleted == 0 {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    pub async fn list_pending(&self, actor_id: ObjectId) -> ServiceResult<Vec<Invitation>> {
        self.require_owner(actor_id).await?;
        Ok(self.invitations.list_pending().await?)
    }

    async fn require_owner(&self, actor_id: ObjectId) -> ServiceResult<()> {
        if self.profiles.is_privileged(actor_id).await? {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(
                "Only owners can manage invitations".to_string(),
            ))
        }
    }
}
