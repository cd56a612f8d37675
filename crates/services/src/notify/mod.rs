use async_trait::async_trait;
use lakehouse_config::EmailSettings;
use lakehouse_db::models::{BookingStatus, DateRange};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("email request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("email provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

/// What an operation wants sent, produced after the state transition has
/// been persisted. Transitions stay pure; the dispatcher below owns the
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationIntent {
    BookingRequested {
        to: Vec<String>,
        requester_name: String,
        listing_name: String,
        range: DateRange,
        guests: u32,
    },
    BookingStatusChanged {
        to: String,
        status: BookingStatus,
        listing_name: String,
        range: DateRange,
    },
    InvitationCreated {
        to: String,
        full_name: String,
        inviter_name: String,
        invite_url: String,
    },
}

impl NotificationIntent {
    pub fn recipients(&self) -> Vec<String> {
        match self {
            NotificationIntent::BookingRequested { to, .. } => to.clone(),
            NotificationIntent::BookingStatusChanged { to, .. }
            | NotificationIntent::InvitationCreated { to, .. } => vec![to.clone()],
        }
    }

    pub fn subject(&self) -> String {
        match self {
            NotificationIntent::BookingRequested { listing_name, .. } => {
                format!("New booking request - {listing_name}")
            }
            NotificationIntent::BookingStatusChanged {
                status,
                listing_name,
                ..
            } => format!("Booking {status} - {listing_name}"),
            NotificationIntent::InvitationCreated { inviter_name, .. } => {
                format!("{inviter_name} invited you to the lake house")
            }
        }
    }

    pub fn body(&self) -> String {
        match self {
            NotificationIntent::BookingRequested {
                requester_name,
                listing_name,
                range,
                guests,
                ..
            } => format!(
                "{requester_name} requested {listing_name} from {} to {} \
                 for {guests} guest(s).\n\nThe request is pending your approval.",
                range.start, range.end
            ),
            NotificationIntent::BookingStatusChanged {
                status,
                listing_name,
                range,
                ..
            } => format!(
                "Your booking at {listing_name} from {} to {} is now {status}.",
                range.start, range.end
            ),
            NotificationIntent::InvitationCreated {
                full_name,
                inviter_name,
                invite_url,
                ..
            } => format!(
                "Hello {full_name}!\n\n{inviter_name} invited you to join the \
                 lake house. Accept your invitation here:\n\n{invite_url}\n\n\
                 This link expires in 7 days. All booking requests require \
                 owner approval."
            ),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotifierError>;
}

/// Sends intents through the Resend HTTP API. With no API key configured,
/// delivery is disabled and intents are only logged (local dev, tests).
pub struct EmailNotifier {
    client: reqwest::Client,
    settings: EmailSettings,
}

impl EmailNotifier {
    pub fn new(settings: EmailSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotifierError> {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            info!(subject = %intent.subject(), "Email delivery disabled, dropping notification");
            return Ok(());
        };

        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(api_key)
            .json(&json!({
                "from": self.settings.from,
                "to": intent.recipients(),
                "subject": intent.subject(),
                "text": intent.body(),
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::Provider { status, body });
        }
        Ok(())
    }
}

/// Fire-and-forget fan-out: each intent is delivered on its own task, and
/// delivery failures are logged and swallowed. A failed email never becomes
/// an operation failure and never rolls back a transition.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub fn dispatch(&self, intents: Vec<NotificationIntent>) {
        for intent in intents {
            let notifier = self.notifier.clone();
            tokio::spawn(async move {
                if let Err(err) = notifier.deliver(&intent).await {
                    warn!(error = %err, subject = %intent.subject(), "Notification delivery failed");
                }
            });
        }
    }
}
