pub mod base;
pub mod blackout;
pub mod booking;
pub mod invitation;
pub mod listing;
pub mod profile;

pub use base::BaseDao;
