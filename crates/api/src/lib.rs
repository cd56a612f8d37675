pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{delete, get, post},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (invite-only: there is no register endpoint)
    let auth_routes = Router::new()
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh))
        .route("/me", get(routes::auth::me));

    // Listing routes (read-only reference data)
    let listing_routes = Router::new()
        .route("/{listing_id}", get(routes::listing::get))
        .route("/{listing_id}/availability", get(routes::listing::availability))
        .route("/{listing_id}/blackout", get(routes::blackout::list));

    // Booking routes
    let booking_routes = Router::new()
        .route("/", post(routes::booking::create).get(routes::booking::list_own))
        .route("/{booking_id}", get(routes::booking::get))
        .route("/{booking_id}/approve", post(routes::booking::approve))
        .route("/{booking_id}/deny", post(routes::booking::deny))
        .route("/{booking_id}/cancel", post(routes::booking::cancel));

    // Blackout routes (owner only)
    let blackout_routes = Router::new()
        .route("/", post(routes::blackout::create))
        .route("/{blackout_id}", delete(routes::blackout::remove));

    // Invitation routes; the token endpoints are public so an invitee can
    // validate and accept before having an account
    let invitation_routes = Router::new()
        .route(
            "/",
            post(routes::invitation::create).get(routes::invitation::list_pending),
        )
        .route("/{invitation_id}", delete(routes::invitation::cancel))
        .route("/token/{token}", get(routes::invitation::validate))
        .route("/token/{token}/accept", post(routes::invitation::accept));

    // Owner review queue
    let admin_routes = Router::new().route("/booking", get(routes::booking::queue));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/listing", listing_routes)
        .nest("/api/booking", booking_routes)
        .nest("/api/blackout", blackout_routes)
        .nest("/api/invitation", invitation_routes)
        .nest("/api/admin", admin_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
