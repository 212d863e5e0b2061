use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppResult, middleware::request_id::RequestId, models::NextEpisode};

use super::{extract::ApiQuery, AppState};

const NOTHING_TO_RECOMMEND: &str = "No next episode found for any started series";

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RandomNextEpisodeQuery {
    pub user_id: String,
    #[serde(default)]
    pub play: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NextEpisodeResponse {
    pub success: bool,
    pub message: String,
    pub episode_id: Option<Uuid>,
    pub episode_name: Option<String>,
    pub series_name: Option<String>,
    pub season_number: Option<u32>,
    pub episode_number: Option<u32>,
    /// Session that received the play command, for `play=true` requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl NextEpisodeResponse {
    fn found(next: &NextEpisode, message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            episode_id: Some(next.episode.id),
            episode_name: Some(next.episode.name.clone()),
            series_name: Some(next.series_name.clone()),
            season_number: next.episode.season_number,
            episode_number: next.episode.episode_number,
            session_id: None,
        }
    }

    fn nothing_to_recommend() -> Self {
        Self {
            success: false,
            message: NOTHING_TO_RECOMMEND.to_string(),
            episode_id: None,
            episode_name: None,
            series_name: None,
            season_number: None,
            episode_number: None,
            session_id: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContinueWatchingQuery {
    pub user_id: String,
    pub limit: Option<i64>,
    #[serde(default)]
    pub shuffle: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EpisodeItem {
    pub id: Uuid,
    pub name: String,
    pub series_id: Uuid,
    pub series_name: String,
    pub season_number: Option<u32>,
    pub episode_number: Option<u32>,
}

impl From<NextEpisode> for EpisodeItem {
    fn from(next: NextEpisode) -> Self {
        Self {
            id: next.episode.id,
            name: next.episode.name,
            series_id: next.episode.series_id,
            series_name: next.series_name,
            season_number: next.episode.season_number,
            episode_number: next.episode.episode_number,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContinueWatchingResponse {
    pub items: Vec<EpisodeItem>,
    pub total_record_count: usize,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Find a random next episode without playing it
pub async fn get_random_next_episode(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiQuery(query): ApiQuery<RandomNextEpisodeQuery>,
) -> AppResult<Json<NextEpisodeResponse>> {
    tracing::info!(request_id = %request_id, "Processing random next episode request");

    let response = match state.next_episodes.random_next_episode(&query.user_id).await? {
        Some(next) => NextEpisodeResponse::found(&next, "Episode found successfully"),
        None => NextEpisodeResponse::nothing_to_recommend(),
    };

    Ok(Json(response))
}

/// Find a random next episode and optionally start it on the user's session
pub async fn post_random_next_episode(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiQuery(query): ApiQuery<RandomNextEpisodeQuery>,
) -> AppResult<Json<NextEpisodeResponse>> {
    tracing::info!(
        request_id = %request_id,
        play = query.play,
        "Processing random next episode request"
    );

    let user = state.next_episodes.resolve_user(&query.user_id).await?;
    let Some(next) = state.next_episodes.random_next_episode_for(&user).await? else {
        return Ok(Json(NextEpisodeResponse::nothing_to_recommend()));
    };

    if !query.play {
        return Ok(Json(NextEpisodeResponse::found(&next, "Episode found successfully")));
    }

    let command = state.playback.play_now(&user, &next.episode).await?;

    tracing::info!(
        request_id = %request_id,
        session_id = %command.session_id,
        episode_id = %command.episode_id,
        "Episode started playing"
    );

    let mut response = NextEpisodeResponse::found(&next, "Episode started playing");
    response.session_id = Some(command.session_id);
    Ok(Json(response))
}

/// List the next episode of several in-progress series
pub async fn get_continue_watching(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiQuery(query): ApiQuery<ContinueWatchingQuery>,
) -> AppResult<Json<ContinueWatchingResponse>> {
    let limit = query.limit.unwrap_or(state.continue_watching_limit);

    tracing::info!(
        request_id = %request_id,
        limit,
        shuffle = query.shuffle,
        "Processing continue watching request"
    );

    let items: Vec<EpisodeItem> = state
        .next_episodes
        .continue_watching(&query.user_id, limit, query.shuffle)
        .await?
        .into_iter()
        .map(EpisodeItem::from)
        .collect();

    Ok(Json(ContinueWatchingResponse {
        total_record_count: items.len(),
        items,
    }))
}
