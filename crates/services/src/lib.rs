pub mod auth;
pub mod availability;
pub mod blackout;
pub mod booking;
pub mod dao;
pub mod error;
pub mod invitation;
pub mod notify;

pub use auth::AuthService;
pub use availability::AvailabilityService;
pub use blackout::BlackoutService;
pub use booking::BookingService;
pub use dao::*;
pub use error::{ServiceError, ServiceResult};
pub use invitation::InvitationService;
