use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, AppState, LocationQuery};
use crate::models::Location;

/// `GET /location?data=<place>`
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Location>, ApiError> {
    let query = params.search_query()?;
    let location = state.shared.locations.resolve(query).await?;
    Ok(Json(location))
}
