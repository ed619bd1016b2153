use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::presenter::{CityRecommendation, present};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub city: String,
    pub count: usize,
    pub recommendations: Vec<CityRecommendation>,
}

/// Combined recommendations for `?city=`, decorated for display.
///
/// Unknown cities are not an error; they simply get no recommendations.
pub async fn recommend(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let city = query.city.unwrap_or_default();
    if city.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Query parameter 'city' cannot be empty".to_string(),
        ));
    }

    // The lookups are CPU-bound; keep them off the async workers
    let candidates = tokio::task::spawn_blocking({
        let combiner = state.combiner.clone();
        let city = city.clone();
        move || combiner.combine_candidates(&city)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Recommendation task failed: {}", e)))?;

    let recommendations = present(&state.store, candidates);
    info!("Recommending {} cities for {}", recommendations.len(), city);

    Ok(Json(RecommendationsResponse {
        city,
        count: recommendations.len(),
        recommendations,
    }))
}
