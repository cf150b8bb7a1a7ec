use axum::{routing::{get, post}, Router};
use tower_http::{
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};
use tracing::Level;

use crate::{
    auth,
    config::Config,
    crud::Crud,
    health,
    resources::{
        amenities::Amenities, booking_statuses::BookingStatuses, bookings::Bookings, cities::Cities,
        countries::Countries, discounts::Discounts, hotels::Hotels, payment_methods::PaymentMethods,
        reviews::{self, Reviews}, room_types::RoomTypes, rooms::Rooms, users::Users,
    },
    session::Gate,
    AppState,
};

/// Every route of the API, before state and layers are attached.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .merge(auth::router())
        .merge(admin_routes())
        .merge(public_routes())
}

/// Back-office routes. All of them require an ADMIN or MANAGER session.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .merge(Crud::<Amenities>::new("/api/admin/amenities", Gate::Staff).list().create().update().delete().into_router())
        .merge(Crud::<BookingStatuses>::new("/api/admin/booking-statuses", Gate::Staff).list().create().update().delete().into_router())
        .merge(Crud::<Bookings>::new("/api/admin/bookings", Gate::Staff).list().into_router())
        .merge(Crud::<Cities>::new("/api/admin/cities", Gate::Staff).list().create().into_router())
        .merge(Crud::<Countries>::new("/api/admin/countries", Gate::Staff).list().create().into_router())
        .merge(Crud::<Discounts>::new("/api/admin/discounts", Gate::Staff).list().create().update().delete().into_router())
        .merge(Crud::<PaymentMethods>::new("/api/admin/payment-methods", Gate::Staff).list().create().update().delete().into_router())
        .merge(Crud::<RoomTypes>::new("/api/admin/room-types", Gate::Staff).list().create().update().delete().into_router())
        .merge(Crud::<Reviews>::new("/api/admin/reviews", Gate::Staff).list().into_router())
        .route("/api/admin/reviews/{id}/approve", post(reviews::approve))
        .merge(Crud::<Users>::new("/api/admin/users", Gate::Staff).list().into_router())
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(Crud::<Hotels>::new("/api/hotels", Gate::Open).list().into_router())
        .merge(Crud::<Rooms>::new("/api/rooms", Gate::Open).list().into_router())
        .merge(Crud::<RoomTypes>::new("/api/room-types", Gate::StaffWrites).list().create().update().delete().into_router())
}

pub fn session_layer(config: &Config) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.session_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(config.session_idle_minutes)))
}

/// Attaches state, sessions and request tracing to `routes`.
pub fn finish(routes: Router<AppState>, app_state: AppState, session_layer: SessionManagerLayer<MemoryStore>) -> Router {
    routes
        .with_state(app_state)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

pub fn build(app_state: AppState, config: &Config) -> Router {
    finish(routes(), app_state, session_layer(config))
}
