pub mod auth;
pub mod blackout;
pub mod booking;
pub mod invitation;
pub mod listing;

/// Responses render BSON timestamps as RFC 3339 strings.
pub(crate) fn rfc3339(dt: bson::DateTime) -> String {
    dt.try_to_rfc3339_string().unwrap_or_default()
}
