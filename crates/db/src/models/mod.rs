pub mod blackout;
pub mod booking;
pub mod invitation;
pub mod listing;
pub mod profile;
pub mod range;

pub use blackout::BlackoutPeriod;
pub use booking::{Booking, BookingStatus};
pub use invitation::{Invitation, InvitationStatus};
pub use listing::Listing;
pub use profile::{Profile, Role};
pub use range::DateRange;
