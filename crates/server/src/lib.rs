//! Server crate for the travel recommendation engine.
//!
//! Wires the artifact store, the recommendation combiner and the
//! itinerary planner into an axum HTTP API. The CLI reuses the
//! configuration and presentation layers from here.

pub mod config;
pub mod error;
pub mod presenter;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use presenter::{CityRecommendation, PlaceDetails, describe_place, present, tooltip};
pub use routes::create_router;
pub use state::AppState;
