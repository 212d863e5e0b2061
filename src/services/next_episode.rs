use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::instrument;

use crate::{
    error::AppResult,
    models::{NextEpisode, Series, User},
    services::{
        aggregator, classifier,
        providers::{CatalogProvider, UserDirectory, WatchStateProvider},
        selector, users,
    },
};

/// Entry point for next-episode recommendations
///
/// Holds no state besides its collaborators; every call classifies the
/// user's series from scratch. Cloning is cheap.
#[derive(Clone)]
pub struct NextEpisodeService {
    catalog: Arc<dyn CatalogProvider>,
    watch_state: Arc<dyn WatchStateProvider>,
    users: Arc<dyn UserDirectory>,
    random_selection: bool,
}

impl NextEpisodeService {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        watch_state: Arc<dyn WatchStateProvider>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            catalog,
            watch_state,
            users,
            random_selection: true,
        }
    }

    /// Switches the random path to a deterministic first-series pick when disabled
    pub fn with_random_selection(mut self, enabled: bool) -> Self {
        self.random_selection = enabled;
        self
    }

    /// Resolves an identity string to a known user
    pub async fn resolve_user(&self, identity: &str) -> AppResult<User> {
        users::resolve_user(self.users.as_ref(), identity).await
    }

    /// In-progress series for the user, in catalog order
    pub async fn started_series(&self, user: &User) -> AppResult<Vec<Series>> {
        classifier::started_series(self.catalog.as_ref(), self.watch_state.as_ref(), user).await
    }

    /// Picks a random in-progress series and returns its next episode
    #[instrument(skip(self))]
    pub async fn random_next_episode(&self, identity: &str) -> AppResult<Option<NextEpisode>> {
        tracing::info!("Finding random next episode");
        let user = self.resolve_user(identity).await?;
        self.random_next_episode_for(&user).await
    }

    /// Same as [`Self::random_next_episode`] for an already resolved user
    pub async fn random_next_episode_for(&self, user: &User) -> AppResult<Option<NextEpisode>> {
        let started = self.started_series(user).await?;

        if self.random_selection {
            selector::select_random(self.catalog.as_ref(), self.watch_state.as_ref(), user, &started)
                .await
        } else {
            selector::select_first(self.catalog.as_ref(), self.watch_state.as_ref(), user, &started)
                .await
        }
    }

    /// Next episodes across the user's in-progress series
    ///
    /// With `shuffle` the in-progress set is shuffled before the first
    /// `limit` series are taken; otherwise catalog order is kept.
    #[instrument(skip(self))]
    pub async fn continue_watching(
        &self,
        identity: &str,
        limit: i64,
        shuffle: bool,
    ) -> AppResult<Vec<NextEpisode>> {
        let user = self.resolve_user(identity).await?;
        let mut started = self.started_series(&user).await?;

        if shuffle {
            started.shuffle(&mut rand::rng());
        }

        aggregator::list_next(
            self.catalog.as_ref(),
            self.watch_state.as_ref(),
            &user,
            &started,
            limit,
        )
        .await
    }
}
