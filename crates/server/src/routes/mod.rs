use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

pub mod itinerary;
pub mod places;
pub mod recommendations;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1", get(overview))
        .nest("/api/v1", api_routes())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/places", get(places::list))
        .route("/places/:name", get(places::show))
        .route("/recommendations", get(recommendations::recommend))
        .route("/itinerary", post(itinerary::plan))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// What the service offers and where to find it
async fn overview() -> Json<Value> {
    Json(json!({
        "title": "Travel Recommendation System",
        "tagline": "Find your next destination and plan the trip around it",
        "features": [
            "City recommendations from content similarity and traveller ratings",
            "Country, population and area for recommended cities",
            "AI itinerary, accommodation, transport and food planning"
        ],
        "pages": {
            "places": "/api/v1/places",
            "recommendations": "/api/v1/recommendations?city={name}",
            "itinerary": "/api/v1/itinerary"
        }
    }))
}
