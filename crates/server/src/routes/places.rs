use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::presenter::{PlaceDetails, describe_place};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub total: usize,
    pub places: Vec<String>,
}

/// Every selectable city, sorted
pub async fn list(State(state): State<AppState>) -> Json<PlacesResponse> {
    let catalog = state.store.catalog();
    Json(PlacesResponse {
        total: catalog.len(),
        places: catalog.names().to_vec(),
    })
}

/// URL and metadata for one city
pub async fn show(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<PlaceDetails>> {
    describe_place(&state.store, &name)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unknown place '{}'", name)))
}
