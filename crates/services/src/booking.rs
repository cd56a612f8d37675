use bson::{DateTime, doc, oid::ObjectId};
use chrono::Utc;
use lakehouse_db::models::{Booking, BookingStatus, DateRange};
use std::sync::Arc;
use tracing::warn;

use crate::availability::AvailabilityService;
use crate::dao::{booking::BookingDao, listing::ListingDao, profile::ProfileDao};
use crate::error::{ServiceError, ServiceResult};
use crate::notify::{NotificationDispatcher, NotificationIntent};

/// The booking state machine. Owns every mutation of a booking: requesters
/// and owners never touch the store directly. Transitions are linearized by
/// a compare-and-set on the status field, and notifications are emitted as
/// intents after the write so a failed email can never roll one back.
pub struct BookingService {
    bookings: Arc<BookingDao>,
    listings: Arc<ListingDao>,
    profiles: Arc<ProfileDao>,
    availability: AvailabilityService,
    dispatcher: NotificationDispatcher,
}

impl BookingService {
    pub fn new(
        bookings: Arc<BookingDao>,
        listings: Arc<ListingDao>,
        profiles: Arc<ProfileDao>,
        availability: AvailabilityService,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            bookings,
            listings,
            profiles,
            availability,
            dispatcher,
        }
    }

    /// Creates a pending booking. All validation and the availability check
    /// run before the insert; on conflict nothing is written and the caller
    /// receives the conflicting ranges.
    ///
    /// Two racing requesters can still both end up pending for overlapping
    /// dates; that is resolved at approval time, first approved wins.
    pub async fn create(
        &self,
        listing_id: ObjectId,
        requester_id: ObjectId,
        range: DateRange,
        guests: u32,
        notes: Option<String>,
    ) -> ServiceResult<Booking> {
        let today = Utc::now().date_naive();
        AvailabilityService::validate_range(range, today)?;

        let listing = self.listings.base.find_by_id(listing_id).await?;

        if guests == 0 {
            return Err(ServiceError::Validation(
                "At least 1 guest required".to_string(),
            ));
        }
        if guests > listing.max_guests {
            return Err(ServiceError::Validation(format!(
                "Maximum {} guests allowed",
                listing.max_guests
            )));
        }
        if range.nights() < i64::from(listing.min_nights) {
            return Err(ServiceError::Validation(format!(
                "Minimum stay is {} nights",
                listing.min_nights
            )));
        }

        let report = self.availability.check(listing_id, range, today).await?;
        if !report.available {
            return Err(ServiceError::DatesUnavailable(report.conflicts));
        }

        let booking = self
            .bookings
            .create(listing_id, requester_id, range, guests, notes)
            .await?;

        match self.request_intent(&booking, &listing.name).await {
            Ok(Some(intent)) => self.dispatcher.dispatch(vec![intent]),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "Failed to build booking-request notification"),
        }

        Ok(booking)
    }

    pub async fn approve(&self, booking_id: ObjectId, actor_id: ObjectId) -> ServiceResult<Booking> {
        self.decide(booking_id, actor_id, BookingStatus::Approved, "approve")
            .await
    }

    pub async fn deny(&self, booking_id: ObjectId, actor_id: ObjectId) -> ServiceResult<Booking> {
        self.decide(booking_id, actor_id, BookingStatus::Denied, "deny")
            .await
    }

    /// Approve or deny a pending booking. Approval deliberately does not
    /// auto-deny other pending requests that overlap the approved range;
    /// the owner resolves those manually from the queue.
    async fn decide(
        &self,
        booking_id: ObjectId,
        actor_id: ObjectId,
        verdict: BookingStatus,
        action: &'static str,
    ) -> ServiceResult<Booking> {
        self.require_owner(actor_id, action).await?;

        let booking = self.bookings.base.find_by_id(booking_id).await?;
        if !booking.status.can_become(verdict) {
            return Err(ServiceError::InvalidTransition {
                from: booking.status,
                attempted: action,
            });
        }

        let stamp = match verdict {
            BookingStatus::Approved => "approved_at",
            BookingStatus::Denied => "denied_at",
            _ => unreachable!("decide only approves or denies"),
        };
        let advanced = self
            .bookings
            .transition(
                booking_id,
                BookingStatus::Pending,
                doc! { "status": verdict.as_str(), stamp: DateTime::now() },
            )
            .await?;
        if !advanced {
            // Lost the race: another actor advanced the status between our
            // read and the compare-and-set.
            let current = self.bookings.base.find_by_id(booking_id).await?;
            return Err(ServiceError::InvalidTransition {
                from: current.status,
                attempted: action,
            });
        }

        let booking = self.bookings.base.find_by_id(booking_id).await?;
        self.dispatch_status_change(&booking).await;
        Ok(booking)
    }

    /// Requesters may cancel their own booking while it is pending; owners
    /// may cancel any pending or approved booking. Denied and cancelled
    /// bookings are terminal.
    pub async fn cancel(&self, booking_id: ObjectId, actor_id: ObjectId) -> ServiceResult<Booking> {
        let booking = self.bookings.base.find_by_id(booking_id).await?;
        if booking.status.is_terminal() {
            return Err(ServiceError::InvalidTransition {
                from: booking.status,
                attempted: "cancel",
            });
        }

        let self_service =
            booking.user_id == actor_id && booking.status == BookingStatus::Pending;
        if !self_service && !self.profiles.is_privileged(actor_id).await? {
            let reason = if booking.user_id == actor_id {
                "Approved bookings can only be cancelled by an owner"
            } else {
                "You can only cancel your own bookings"
            };
            return Err(ServiceError::PermissionDenied(reason.to_string()));
        }

        let advanced = self
            .bookings
            .transition(
                booking_id,
                booking.status,
                doc! {
                    "status": BookingStatus::Cancelled.as_str(),
                    "cancelled_at": DateTime::now(),
                    "cancelled_by": actor_id,
                },
            )
            .await?;
        if !advanced {
            let current = self.bookings.base.find_by_id(booking_id).await?;
            return Err(ServiceError::InvalidTransition {
                from: current.status,
                attempted: "cancel",
            });
        }

        let booking = self.bookings.base.find_by_id(booking_id).await?;
        self.dispatch_status_change(&booking).await;
        Ok(booking)
    }

    pub async fn find_own(&self, user_id: ObjectId) -> ServiceResult<Vec<Booking>> {
        Ok(self.bookings.find_by_user(user_id).await?)
    }

    /// A booking is visible to its requester and to owners.
    pub async fn get(&self, booking_id: ObjectId, actor_id: ObjectId) -> ServiceResult<Booking> {
        let booking = self.bookings.base.find_by_id(booking_id).await?;
        if booking.user_id != actor_id && !self.profiles.is_privileged(actor_id).await? {
            return Err(ServiceError::PermissionDenied(
                "You can only view your own bookings".to_string(),
            ));
        }
        Ok(booking)
    }

    /// The owner's review queue.
    pub async fn list_by_status(
        &self,
        actor_id: ObjectId,
        status: BookingStatus,
    ) -> ServiceResult<Vec<Booking>> {
        self.require_owner(actor_id, "review").await?;
        Ok(self.bookings.find_by_status(status).await?)
    }

    async fn require_owner(&self, actor_id: ObjectId, action: &str) -> ServiceResult<()> {
        if self.profiles.is_privileged(actor_id).await? {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(format!(
                "Only owners can {action} bookings"
            )))
        }
    }

    async fn request_intent(
        &self,
        booking: &Booking,
        listing_name: &str,
    ) -> ServiceResult<Option<NotificationIntent>> {
        let owners = self.profiles.owner_emails().await?;
        if owners.is_empty() {
            return Ok(None);
        }
        let requester = self.profiles.base.find_by_id(booking.user_id).await?;
        Ok(Some(NotificationIntent::BookingRequested {
            to: owners,
            requester_name: requester.full_name,
            listing_name: listing_name.to_string(),
            range: booking.range,
            guests: booking.guests,
        }))
    }

    /// Best effort only: a failure to even build the intent is logged and
    /// swallowed, same as a delivery failure.
    async fn dispatch_status_change(&self, booking: &Booking) {
        let intent = async {
            let requester = self.profiles.base.find_by_id(booking.user_id).await?;
            let listing = self.listings.base.find_by_id(booking.listing_id).await?;
            ServiceResult::Ok(NotificationIntent::BookingStatusChanged {
                to: requester.email,
                status: booking.status,
                listing_name: listing.name,
                range: booking.range,
            })
        }
        .await;

        match intent {
            Ok(intent) => self.dispatcher.dispatch(vec![intent]),
            Err(err) => warn!(error = %err, "Failed to build status-change notification"),
        }
    }
}
