use axum::{Json, extract::State};
use llm_client::{ItineraryRequest, ItineraryResponse, LlmError};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Run one planner section through the language model
pub async fn plan(
    State(state): State<AppState>,
    Json(request): Json<ItineraryRequest>,
) -> AppResult<Json<ItineraryResponse>> {
    request
        .validate()
        .map_err(|reason| AppError::InvalidInput(reason.to_string()))?;

    let generator = state.generator.as_ref().ok_or(LlmError::MissingApiKey)?;
    let response = llm_client::plan(generator.as_ref(), &request).await?;

    Ok(Json(response))
}
