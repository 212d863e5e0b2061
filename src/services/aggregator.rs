use crate::{
    error::AppResult,
    models::{NextEpisode, Series, User},
    services::{
        providers::{CatalogProvider, WatchStateProvider},
        selector::next_unwatched_episode,
    },
};

/// Lists the next episode of each of the first `limit` in-progress series
///
/// Order follows `started`; callers wanting a random sample shuffle first.
/// Series with nothing left to watch are skipped rather than padded, so the
/// result may be shorter than `limit`. A `limit` of zero or less yields an
/// empty list.
pub async fn list_next(
    catalog: &dyn CatalogProvider,
    watch_state: &dyn WatchStateProvider,
    user: &User,
    started: &[Series],
    limit: i64,
) -> AppResult<Vec<NextEpisode>> {
    let take = usize::try_from(limit).unwrap_or(0);
    let mut next_episodes = Vec::with_capacity(take.min(started.len()));

    for series in started.iter().take(take) {
        if let Some(episode) = next_unwatched_episode(catalog, watch_state, user, series).await? {
            next_episodes.push(NextEpisode {
                series_name: series.name.clone(),
                episode,
            });
        }
    }

    tracing::debug!(
        user_id = %user.id,
        limit,
        returned = next_episodes.len(),
        "Built continue watching list"
    );

    Ok(next_episodes)
}
