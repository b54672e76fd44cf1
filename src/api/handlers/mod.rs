use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::budget::{BudgetInput, BudgetSummary};
use crate::catalog;
use crate::models::*;
use crate::planner::{PlanError, PlanInput, TripPlan};
use crate::store::{StoreError, TripStore};

type ApiError = (StatusCode, String);

// ============================================================
// Error Handling
// ============================================================

/// Map a store error to a response. Client mistakes are returned as-is;
/// storage failures are logged server-side and sanitized.
fn store_error(e: StoreError) -> ApiError {
    match e {
        StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "Trip not found".to_string()),
        StoreError::DuplicateId(_) => {
            tracing::warn!("Validation error: {}", e);
            (StatusCode::CONFLICT, e.to_string())
        }
        StoreError::InvalidRating(_) => {
            tracing::warn!("Validation error: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        other => {
            tracing::error!("Internal error: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

fn plan_error(e: PlanError) -> ApiError {
    tracing::warn!("Validation error: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Trips
// ============================================================

pub async fn list_trips(
    State(store): State<TripStore>,
) -> Result<Json<Vec<TripRecord>>, ApiError> {
    store.try_list().map(Json).map_err(store_error)
}

pub async fn get_trip(
    State(store): State<TripStore>,
    Path(id): Path<String>,
) -> Result<Json<TripRecord>, ApiError> {
    store.try_get(&id).map(Json).map_err(store_error)
}

pub async fn create_trip(
    State(store): State<TripStore>,
    Json(record): Json<TripRecord>,
) -> Result<(StatusCode, Json<TripRecord>), ApiError> {
    let id = record.id.clone();
    let trips = store.try_save(record).map_err(store_error)?;
    saved(trips, &id)
}

pub async fn update_trip(
    State(store): State<TripStore>,
    Path(id): Path<String>,
    Json(record): Json<TripRecord>,
) -> Result<Json<TripRecord>, ApiError> {
    if record.id != id {
        return Err((
            StatusCode::BAD_REQUEST,
            "Trip id does not match path".to_string(),
        ));
    }
    let trips = store.try_update(record).map_err(store_error)?;
    trips
        .into_iter()
        .find(|t| t.id == id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Trip not found".to_string()))
}

pub async fn delete_trip(
    State(store): State<TripStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let before = store.try_list().map_err(store_error)?.len();
    let after = store.try_delete(&id).map_err(store_error)?.len();
    if after < before {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Trip not found".to_string()))
    }
}

pub async fn clear_trips(State(store): State<TripStore>) -> Result<StatusCode, ApiError> {
    store.try_clear().map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_trip_notes(
    State(store): State<TripStore>,
    Path(id): Path<String>,
    Json(input): Json<UpdateNotesInput>,
) -> Result<Json<TripRecord>, ApiError> {
    store
        .try_set_notes(&id, input.notes)
        .map(Json)
        .map_err(store_error)
}

pub async fn set_place_note(
    State(store): State<TripStore>,
    Path((id, place_id)): Path<(String, String)>,
    Json(input): Json<PlaceNoteInput>,
) -> Result<Json<TripRecord>, ApiError> {
    store
        .try_set_place_note(&id, &place_id, &input.note)
        .map(Json)
        .map_err(store_error)
}

pub async fn set_place_rating(
    State(store): State<TripStore>,
    Path((id, place_id)): Path<(String, String)>,
    Json(input): Json<PlaceRatingInput>,
) -> Result<Json<TripRecord>, ApiError> {
    store
        .try_set_place_rating(&id, &place_id, input.rating)
        .map(Json)
        .map_err(store_error)
}

fn saved(trips: Vec<TripRecord>, id: &str) -> Result<(StatusCode, Json<TripRecord>), ApiError> {
    trips
        .into_iter()
        .find(|t| t.id == id)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .ok_or_else(|| store_error(StoreError::NotFound(id.to_string())))
}

// ============================================================
// Trip Builder
// ============================================================

pub async fn quote_plan(Json(input): Json<PlanInput>) -> Result<Json<BudgetSummary>, ApiError> {
    let plan = TripPlan::from_input(input).map_err(plan_error)?;
    Ok(Json(plan.summary()))
}

pub async fn create_plan(
    State(store): State<TripStore>,
    Json(input): Json<PlanInput>,
) -> Result<(StatusCode, Json<TripRecord>), ApiError> {
    let record = TripPlan::from_input(input)
        .and_then(TripPlan::into_record)
        .map_err(plan_error)?;
    let id = record.id.clone();
    let trips = store.try_save(record).map_err(store_error)?;
    saved(trips, &id)
}

pub async fn compute_budget(Json(input): Json<BudgetInput>) -> Json<BudgetSummary> {
    Json(input.summarize())
}

// ============================================================
// Catalog
// ============================================================

pub async fn list_flights() -> Json<&'static [FlightOption]> {
    Json(catalog::FLIGHTS)
}

pub async fn list_stays() -> Json<&'static [StayOption]> {
    Json(catalog::STAYS)
}

pub async fn list_itinerary() -> Json<&'static [ItinerarySlot]> {
    Json(catalog::ITINERARY)
}

#[derive(Debug, Deserialize)]
pub struct ActivitiesQuery {
    pub slot: String,
    pub stay: String,
}

pub async fn list_activities(
    Query(query): Query<ActivitiesQuery>,
) -> Json<&'static [ActivityOption]> {
    Json(catalog::activities_for(&query.slot, &query.stay))
}

#[derive(Debug, Deserialize)]
pub struct LocationsQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search_locations(Query(query): Query<LocationsQuery>) -> Json<Vec<&'static str>> {
    Json(catalog::search_locations(&query.q))
}

pub async fn home_feed() -> Json<HomeFeed> {
    Json(catalog::home_feed())
}
