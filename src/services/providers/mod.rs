//! Collaborator abstractions for the host media catalog
//!
//! The recommendation core never owns catalog data. It reads series, episodes,
//! users and watch state through these traits at call time, and the API layer
//! hands chosen episodes to a [`PlaybackDispatcher`]. Implementations map their
//! own failures onto the matching `AppError` variant
//! (`CatalogUnavailable`, `WatchStateUnavailable`, `PlaybackUnavailable`).

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Episode, PlaybackCommand, Series, User},
};

pub mod library;

pub use library::{InMemoryLibrary, LibrarySnapshot, SessionEntry};

/// Enumerates series and episodes visible to a user
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Lists every series the user may see, in catalog order
    async fn list_series(&self, user: &User) -> AppResult<Vec<Series>>;

    /// Lists all episodes of a series, recursively across seasons
    ///
    /// No ordering is promised; callers sort into broadcast order themselves.
    async fn list_episodes(&self, series: &Series) -> AppResult<Vec<Episode>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Per-user, per-episode watched flags
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WatchStateProvider: Send + Sync {
    async fn is_watched(&self, user: &User, episode: &Episode) -> AppResult<bool>;
}

/// Resolves user identifiers to known users
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns `None` when no such user exists
    async fn resolve_user(&self, user_id: Uuid) -> AppResult<Option<User>>;
}

/// Sends "play now" commands to a user's active session
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlaybackDispatcher: Send + Sync {
    /// Starts `episode` on the user's first active session
    ///
    /// Fails with `NoActiveSession` when the user has none.
    async fn play_now(&self, user: &User, episode: &Episode) -> AppResult<PlaybackCommand>;
}
