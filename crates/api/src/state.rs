use lakehouse_config::Settings;
use lakehouse_services::{
    AuthService, AvailabilityService, BlackoutService, BookingService, InvitationService,
    dao::{
        blackout::BlackoutDao, booking::BookingDao, invitation::InvitationDao,
        listing::ListingDao, profile::ProfileDao,
    },
    notify::{EmailNotifier, NotificationDispatcher, Notifier},
};
use mongodb::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub auth: Arc<AuthService>,
    pub profiles: Arc<ProfileDao>,
    pub listings: Arc<ListingDao>,
    pub availability: AvailabilityService,
    pub bookings: Arc<BookingService>,
    pub blackouts: Arc<BlackoutService>,
    pub invitations: Arc<InvitationService>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        let auth = Arc::new(AuthService::new(settings.jwt.clone()));
        let booking_dao = Arc::new(BookingDao::new(&db));
        let blackout_dao = Arc::new(BlackoutDao::new(&db));
        let invitation_dao = Arc::new(InvitationDao::new(&db));
        let profiles = Arc::new(ProfileDao::new(&db));
        let listings = Arc::new(ListingDao::new(&db));

        let notifier: Arc<dyn Notifier> = Arc::new(EmailNotifier::new(settings.email.clone()));
        let dispatcher = NotificationDispatcher::new(notifier);

        let availability =
            AvailabilityService::new(booking_dao.clone(), blackout_dao.clone());
        let bookings = Arc::new(BookingService::new(
            booking_dao,
            listings.clone(),
            profiles.clone(),
            availability.clone(),
            dispatcher.clone(),
        ));
        let blackouts = Arc::new(BlackoutService::new(blackout_dao, profiles.clone()));
        let invitations = Arc::new(InvitationService::new(
            invitation_dao,
            profiles.clone(),
            auth.clone(),
            dispatcher,
            settings.app.site_url.clone(),
        ));

        Self {
            db,
            settings,
            auth,
            profiles,
            listings,
            availability,
            bookings,
            blackouts,
            invitations,
        }
    }
}
