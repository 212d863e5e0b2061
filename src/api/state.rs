use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        providers::{InMemoryLibrary, PlaybackDispatcher},
        NextEpisodeService,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub next_episodes: NextEpisodeService,
    pub playback: Arc<dyn PlaybackDispatcher>,
    /// Listing size used when a request carries no limit
    pub continue_watching_limit: i64,
}

impl AppState {
    /// Wires every collaborator to one in-memory library
    pub fn from_library(library: Arc<InMemoryLibrary>, config: &Config) -> Self {
        let next_episodes =
            NextEpisodeService::new(library.clone(), library.clone(), library.clone())
                .with_random_selection(config.enable_random_selection);

        Self {
            next_episodes,
            playback: library,
            continue_watching_limit: config.continue_watching_limit,
        }
    }
}
