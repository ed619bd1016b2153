//! Language model client for the itinerary planner.
//!
//! This crate provides:
//! - The planner forms, their fixed prompts and input rendering
//! - A `TextGenerator` abstraction over "instructions + input -> text"
//! - A Gemini implementation over its REST API, with a request timeout
//! - Classification of upstream failures into `LlmError`
//!
//! Calls are never retried; a failure is reported to the caller as-is.

pub mod error;
pub mod gemini;
pub mod prompts;

pub use error::{LlmError, Result, classify_status};
pub use gemini::{DEFAULT_API_URL, DEFAULT_MODEL, GeminiClient};
pub use prompts::{
    AccommodationForm, AccommodationType, Activity, Ambiance, Cuisine, DietaryRestriction,
    DiningExperience, FoodForm, ItineraryRequest, LocalCuisine, PlannerSection, Proximity,
    PublicTransport, RentalService, TransportForm, TransportMode, TravelParty, TripForm,
};

use serde::Serialize;
use tracing::{info, instrument};

/// Anything that can answer a prompt made of instructions plus user input
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instructions: &str, input: &str) -> Result<String>;
}

/// A planner answer, ready to display under its heading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryResponse {
    pub section: PlannerSection,
    pub heading: String,
    pub response: String,
}

/// Send a filled planner form to the model and wrap its answer
#[instrument(skip_all, fields(section = %request.section()))]
pub async fn plan(
    generator: &dyn TextGenerator,
    request: &ItineraryRequest,
) -> Result<ItineraryResponse> {
    let input = request.render_input();
    let response = generator.generate(request.instructions(), &input).await?;

    info!("Planner answered with {} characters", response.len());
    Ok(ItineraryResponse {
        section: request.section(),
        heading: request.heading().to_string(),
        response,
    })
}
