use tracing::instrument;

use crate::{
    error::AppResult,
    models::{ClassifiedSeries, ProgressClass, Series, User},
    services::providers::{CatalogProvider, WatchStateProvider},
};

/// Classifies each series by how much of it the user has watched
///
/// Series without episodes are left out of the result. The output keeps the
/// order of `all_series`. Watch state is read fresh on every call.
#[instrument(skip_all, fields(user_id = %user.id, series_count = all_series.len()))]
pub async fn classify(
    catalog: &dyn CatalogProvider,
    watch_state: &dyn WatchStateProvider,
    user: &User,
    all_series: Vec<Series>,
) -> AppResult<Vec<ClassifiedSeries>> {
    let mut classified = Vec::with_capacity(all_series.len());

    for series in all_series {
        match classify_series(catalog, watch_state, user, &series).await? {
            Some(progress) => classified.push(ClassifiedSeries { series, progress }),
            None => tracing::debug!(series_id = %series.id, "Skipping series without episodes"),
        }
    }

    Ok(classified)
}

/// Classifies a single series, or `None` when it has no episodes
pub async fn classify_series(
    catalog: &dyn CatalogProvider,
    watch_state: &dyn WatchStateProvider,
    user: &User,
    series: &Series,
) -> AppResult<Option<ProgressClass>> {
    let episodes = catalog.list_episodes(series).await?;

    let mut watched = 0;
    let mut unwatched = 0;
    for episode in &episodes {
        if watch_state.is_watched(user, episode).await? {
            watched += 1;
        } else {
            unwatched += 1;
        }

        // Both seen: the series is in progress whatever the rest says
        if watched > 0 && unwatched > 0 {
            break;
        }
    }

    Ok(ProgressClass::from_counts(watched, watched + unwatched))
}

/// Keeps only in-progress series, preserving order
pub fn in_progress(classified: Vec<ClassifiedSeries>) -> Vec<Series> {
    classified
        .into_iter()
        .filter(|c| c.progress == ProgressClass::InProgress)
        .map(|c| c.series)
        .collect()
}

/// Lists the user's in-progress series in catalog order
pub async fn started_series(
    catalog: &dyn CatalogProvider,
    watch_state: &dyn WatchStateProvider,
    user: &User,
) -> AppResult<Vec<Series>> {
    let all_series = catalog.list_series(user).await?;
    let classified = classify(catalog, watch_state, user, all_series).await?;
    let started = in_progress(classified);

    tracing::debug!(
        user_id = %user.id,
        provider = catalog.name(),
        started_count = started.len(),
        "Classified series"
    );

    Ok(started)
}
