//! In-memory media library
//!
//! Implements every collaborator trait over a single snapshot held behind a
//! lock. Used by the binary (seeded from a JSON file) and by tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Episode, PlaybackCommand, Series, User},
    services::providers::{CatalogProvider, PlaybackDispatcher, UserDirectory, WatchStateProvider},
};

/// A (user, episode) pair marked as watched
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WatchedEntry {
    pub user_id: Uuid,
    pub episode_id: Uuid,
}

/// Number of play commands kept for inspection
pub const DISPATCH_HISTORY_LIMIT: usize = 32;

/// An active playback session owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionEntry {
    pub user_id: Uuid,
    pub session_id: String,
}

/// Serialized form of a library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
    #[serde(default)]
    pub watched: Vec<WatchedEntry>,
    /// Sessions in registration order; the first one per user receives play commands
    #[serde(default)]
    pub sessions: Vec<SessionEntry>,
}

#[derive(Default)]
struct LibraryInner {
    users: HashMap<Uuid, User>,
    series: Vec<Series>,
    episodes: Vec<Episode>,
    watched: HashSet<WatchedEntry>,
    /// user id → session ids, oldest first
    sessions: HashMap<Uuid, Vec<String>>,
    /// Most recent play commands, at most `DISPATCH_HISTORY_LIMIT`
    dispatched: VecDeque<PlaybackCommand>,
}

/// Library backed by process memory
#[derive(Default)]
pub struct InMemoryLibrary {
    inner: RwLock<LibraryInner>,
}

impl InMemoryLibrary {
    /// Creates an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a library from a snapshot
    pub fn from_snapshot(snapshot: LibrarySnapshot) -> Self {
        let mut sessions: HashMap<Uuid, Vec<String>> = HashMap::new();
        for entry in snapshot.sessions {
            sessions.entry(entry.user_id).or_default().push(entry.session_id);
        }

        let inner = LibraryInner {
            users: snapshot.users.into_iter().map(|u| (u.id, u)).collect(),
            series: snapshot.series,
            episodes: snapshot.episodes,
            watched: snapshot.watched.into_iter().collect(),
            sessions,
            ..Default::default()
        };

        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Loads a JSON snapshot from disk
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read library snapshot {}", path.display()))?;
        let snapshot: LibrarySnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse library snapshot {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            users = snapshot.users.len(),
            series = snapshot.series.len(),
            episodes = snapshot.episodes.len(),
            sessions = snapshot.sessions.len(),
            "Loaded library snapshot"
        );

        Ok(Self::from_snapshot(snapshot))
    }

    pub async fn add_user(&self, user: User) {
        self.inner.write().await.users.insert(user.id, user);
    }

    pub async fn add_series(&self, series: Series) {
        self.inner.write().await.series.push(series);
    }

    pub async fn add_episode(&self, episode: Episode) {
        self.inner.write().await.episodes.push(episode);
    }

    pub async fn mark_watched(&self, user_id: Uuid, episode_id: Uuid) {
        self.inner.write().await.watched.insert(WatchedEntry {
            user_id,
            episode_id,
        });
    }

    pub async fn mark_unwatched(&self, user_id: Uuid, episode_id: Uuid) {
        self.inner.write().await.watched.remove(&WatchedEntry {
            user_id,
            episode_id,
        });
    }

    /// Registers an active playback session for a user
    pub async fn register_session(&self, user_id: Uuid, session_id: impl Into<String>) {
        self.inner
            .write()
            .await
            .sessions
            .entry(user_id)
            .or_default()
            .push(session_id.into());
    }

    /// Most recent commands sent through [`PlaybackDispatcher::play_now`], oldest first
    pub async fn dispatched_commands(&self) -> Vec<PlaybackCommand> {
        self.inner.read().await.dispatched.iter().cloned().collect()
    }
}

#[async_trait::async_trait]
impl CatalogProvider for InMemoryLibrary {
    async fn list_series(&self, _user: &User) -> AppResult<Vec<Series>> {
        Ok(self.inner.read().await.series.clone())
    }

    async fn list_episodes(&self, series: &Series) -> AppResult<Vec<Episode>> {
        let inner = self.inner.read().await;
        Ok(inner
            .episodes
            .iter()
            .filter(|e| e.series_id == series.id)
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

#[async_trait::async_trait]
impl WatchStateProvider for InMemoryLibrary {
    async fn is_watched(&self, user: &User, episode: &Episode) -> AppResult<bool> {
        Ok(self.inner.read().await.watched.contains(&WatchedEntry {
            user_id: user.id,
            episode_id: episode.id,
        }))
    }
}

#[async_trait::async_trait]
impl UserDirectory for InMemoryLibrary {
    async fn resolve_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&user_id).cloned())
    }
}

#[async_trait::async_trait]
impl PlaybackDispatcher for InMemoryLibrary {
    async fn play_now(&self, user: &User, episode: &Episode) -> AppResult<PlaybackCommand> {
        let mut inner = self.inner.write().await;

        let session_id = inner
            .sessions
            .get(&user.id)
            .and_then(|sessions| sessions.first())
            .cloned()
            .ok_or(AppError::NoActiveSession(user.id))?;

        let command = PlaybackCommand {
            session_id,
            user_id: user.id,
            episode_id: episode.id,
            issued_at: Utc::now(),
        };
        if inner.dispatched.len() == DISPATCH_HISTORY_LIMIT {
            inner.dispatched.pop_front();
        }
        inner.dispatched.push_back(command.clone());

        tracing::info!(
            user_id = %user.id,
            session_id = %command.session_id,
            episode_id = %episode.id,
            "Dispatched play command"
        );

        Ok(command)
    }
}
