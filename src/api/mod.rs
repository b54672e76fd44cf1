mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::TripStore;

pub fn create_router(store: TripStore) -> Router {
    let api = Router::new()
        // Trips
        .route(
            "/trips",
            get(handlers::list_trips)
                .post(handlers::create_trip)
                .delete(handlers::clear_trips),
        )
        .route(
            "/trips/{id}",
            get(handlers::get_trip)
                .put(handlers::update_trip)
                .delete(handlers::delete_trip),
        )
        .route("/trips/{id}/notes", put(handlers::set_trip_notes))
        .route(
            "/trips/{id}/places/{place_id}/note",
            put(handlers::set_place_note),
        )
        .route(
            "/trips/{id}/places/{place_id}/rating",
            put(handlers::set_place_rating),
        )
        // Trip builder
        .route("/plans", post(handlers::create_plan))
        .route("/plans/quote", post(handlers::quote_plan))
        .route("/budget", post(handlers::compute_budget))
        // Catalog
        .route("/catalog/flights", get(handlers::list_flights))
        .route("/catalog/stays", get(handlers::list_stays))
        .route("/catalog/itinerary", get(handlers::list_itinerary))
        .route("/catalog/activities", get(handlers::list_activities))
        .route("/catalog/locations", get(handlers::search_locations))
        .route("/catalog/feed", get(handlers::home_feed))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}
