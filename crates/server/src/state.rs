use std::sync::Arc;

use anyhow::{Context, Result};
use data_loader::ArtifactStore;
use llm_client::{LlmError, TextGenerator};
use pipeline::RecommendationCombiner;
use tracing::{info, warn};

use crate::config::Config;

/// Shared application state
///
/// Everything here is read-only after startup, so handlers share it
/// without locks.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub combiner: RecommendationCombiner,
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    /// State over a loaded store, with the itinerary planner disabled
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self {
            combiner: RecommendationCombiner::new(store.clone()),
            store,
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Load artifacts and connect the planner as configured
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = ArtifactStore::load_from_dir(&config.artifacts_dir).with_context(|| {
            format!(
                "Failed to load artifacts from {}",
                config.artifacts_dir.display()
            )
        })?;
        let state = Self::new(Arc::new(store));

        match config.gemini_client() {
            Ok(client) => {
                info!("Itinerary planner enabled with model {}", client.model());
                Ok(state.with_generator(Arc::new(client)))
            }
            Err(LlmError::MissingApiKey) => {
                warn!("GOOGLE_API_KEY is not set, itinerary planner disabled");
                Ok(state)
            }
            Err(e) => Err(e).context("Failed to build Gemini client"),
        }
    }
}
