//! Per-domain record endpoints.
//!
//! Each handler resolves `?data=<place>` to a location and then asks the
//! domain's cache for its records. Successful responses are bare JSON arrays
//! in provider order.

use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, AppState, LocationQuery};
use crate::clients::RecordProvider;
use crate::models::{MeetUp, Movie, Restaurant, Trail, Weather};
use crate::services::RecordService;

async fn records_for<P: RecordProvider>(
    state: &AppState,
    service: &RecordService<P>,
    params: &LocationQuery,
) -> Result<Json<Vec<P::Record>>, ApiError> {
    let query = params.search_query()?;
    let location = state.shared.locations.resolve(query).await?;
    let records = service.get_records(&location).await?;
    Ok(Json(records))
}

/// `GET /weather?data=<place>`
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Vec<Weather>>, ApiError> {
    records_for(&state, &state.shared.weather, &params).await
}

/// `GET /yelp?data=<place>`
pub async fn get_restaurants(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    records_for(&state, &state.shared.restaurants, &params).await
}

/// `GET /movies?data=<place>`
pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    records_for(&state, &state.shared.movies, &params).await
}

/// `GET /meetups?data=<place>`
pub async fn get_meetups(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Vec<MeetUp>>, ApiError> {
    records_for(&state, &state.shared.meetups, &params).await
}

/// `GET /trails?data=<place>`
pub async fn get_trails(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Vec<Trail>>, ApiError> {
    records_for(&state, &state.shared.trails, &params).await
}
