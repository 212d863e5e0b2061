use rand::Rng;

use crate::{
    error::AppResult,
    models::{sort_broadcast_order, Episode, NextEpisode, Series, User},
    services::providers::{CatalogProvider, WatchStateProvider},
};

/// Returns the first unwatched episode of a series in broadcast order
///
/// `None` means every episode is watched, which for an in-progress series
/// only happens when watch state changed after classification.
pub async fn next_unwatched_episode(
    catalog: &dyn CatalogProvider,
    watch_state: &dyn WatchStateProvider,
    user: &User,
    series: &Series,
) -> AppResult<Option<Episode>> {
    let mut episodes = catalog.list_episodes(series).await?;
    sort_broadcast_order(&mut episodes);

    for episode in episodes {
        if !watch_state.is_watched(user, &episode).await? {
            return Ok(Some(episode));
        }
    }

    tracing::debug!(
        user_id = %user.id,
        series_id = %series.id,
        "No unwatched episode left in series"
    );

    Ok(None)
}

/// Draws one series uniformly from `started`
pub fn pick_series<'a, R: Rng + ?Sized>(started: &'a [Series], rng: &mut R) -> Option<&'a Series> {
    if started.is_empty() {
        return None;
    }
    started.get(rng.random_range(0..started.len()))
}

/// Picks a random in-progress series and returns its next episode
///
/// `started` must already be filtered down to in-progress series. Each call
/// draws from the calling thread's own generator. The result carries the
/// picked series' name, not a lookup through the episode's back-reference.
pub async fn select_random(
    catalog: &dyn CatalogProvider,
    watch_state: &dyn WatchStateProvider,
    user: &User,
    started: &[Series],
) -> AppResult<Option<NextEpisode>> {
    let picked = {
        let mut rng = rand::rng();
        pick_series(started, &mut rng)
    };

    select_from(catalog, watch_state, user, picked).await
}

/// Returns the next episode of the first in-progress series
pub async fn select_first(
    catalog: &dyn CatalogProvider,
    watch_state: &dyn WatchStateProvider,
    user: &User,
    started: &[Series],
) -> AppResult<Option<NextEpisode>> {
    select_from(catalog, watch_state, user, started.first()).await
}

async fn select_from(
    catalog: &dyn CatalogProvider,
    watch_state: &dyn WatchStateProvider,
    user: &User,
    picked: Option<&Series>,
) -> AppResult<Option<NextEpisode>> {
    let Some(series) = picked else {
        tracing::info!(user_id = %user.id, "No started series found");
        return Ok(None);
    };

    let episode = next_unwatched_episode(catalog, watch_state, user, series).await?;

    match &episode {
        Some(episode) => tracing::info!(
            user_id = %user.id,
            series = %series.name,
            episode = %episode.name,
            "Found next episode"
        ),
        None => tracing::info!(
            user_id = %user.id,
            series = %series.name,
            "No next episode found for series"
        ),
    }

    Ok(episode.map(|episode| NextEpisode {
        series_name: series.name.clone(),
        episode,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::{MockCatalogProvider, MockWatchStateProvider};
    use crate::services::test_support::{library_with_user, seed_series};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_select_random_returns_first_unwatched() {
        let (library, user) = library_with_user().await;
        let (series, episodes) = seed_series(&library, &user, "A", &[true, false, false]).await;

        let next = select_random(&library, &library, &user, &[series])
            .await
            .unwrap();

        let next = next.unwrap();
        assert_eq!(next.episode, episodes[1]);
        assert_eq!(next.episode.name, "S1E2");
        assert_eq!(next.series_name, "A");
    }

    #[tokio::test]
    async fn test_select_random_singleton_is_deterministic() {
        let (library, user) = library_with_user().await;
        let (series, episodes) = seed_series(&library, &user, "A", &[true, true, false, true]).await;
        let started = vec![series];

        for _ in 0..20 {
            let next = select_random(&library, &library, &user, &started)
                .await
                .unwrap();
            assert_eq!(next.map(|n| n.episode).as_ref(), Some(&episodes[2]));
        }
    }

    #[tokio::test]
    async fn test_select_random_empty_set_returns_none() {
        let user = User::new("alice");
        let mut catalog = MockCatalogProvider::new();
        catalog.expect_list_episodes().never();
        let mut watch_state = MockWatchStateProvider::new();
        watch_state.expect_is_watched().never();

        let next = select_random(&catalog, &watch_state, &user, &[]).await.unwrap();
        assert_eq!(next, None);
    }

    #[tokio::test]
    async fn test_next_unwatched_uses_broadcast_order() {
        let (library, user) = library_with_user().await;
        let series = Series::new("Out Of Order");
        library.add_series(series.clone()).await;

        let s2e1 = Episode::new(&series, "S2E1", Some(2), Some(1));
        let s1e2 = Episode::new(&series, "S1E2", Some(1), Some(2));
        let s1e1 = Episode::new(&series, "S1E1", Some(1), Some(1));
        for episode in [&s2e1, &s1e2, &s1e1] {
            library.add_episode(episode.clone()).await;
        }
        library.mark_watched(user.id, s1e1.id).await;

        let next = next_unwatched_episode(&library, &library, &user, &series)
            .await
            .unwrap();
        assert_eq!(next, Some(s1e2));
    }

    #[tokio::test]
    async fn test_next_unwatched_treats_missing_numbers_as_zero() {
        let (library, user) = library_with_user().await;
        let series = Series::new("Specials");
        library.add_series(series.clone()).await;

        let pilot = Episode::new(&series, "Pilot", Some(1), Some(1));
        let special = Episode::new(&series, "Special", None, None);
        library.add_episode(pilot.clone()).await;
        library.add_episode(special.clone()).await;
        library.mark_watched(user.id, pilot.id).await;

        let next = next_unwatched_episode(&library, &library, &user, &series)
            .await
            .unwrap();
        assert_eq!(next, Some(special));
    }

    #[tokio::test]
    async fn test_next_unwatched_keeps_catalog_order_for_ties() {
        let (library, user) = library_with_user().await;
        let series = Series::new("Ties");
        library.add_series(series.clone()).await;

        let first = Episode::new(&series, "Part One", Some(1), Some(3));
        let second = Episode::new(&series, "Part Two", Some(1), Some(3));
        library.add_episode(first.clone()).await;
        library.add_episode(second.clone()).await;

        let next = next_unwatched_episode(&library, &library, &user, &series)
            .await
            .unwrap();
        assert_eq!(next, Some(first));
    }

    #[tokio::test]
    async fn test_fully_watched_series_yields_none() {
        let (library, user) = library_with_user().await;
        // Classified as in progress, then the last episode got watched
        let (series, _) = seed_series(&library, &user, "Raced", &[true, true]).await;

        let next = select_random(&library, &library, &user, &[series])
            .await
            .unwrap();
        assert_eq!(next, None);
    }

    #[tokio::test]
    async fn test_select_first_uses_catalog_order() {
        let (library, user) = library_with_user().await;
        let (a, a_episodes) = seed_series(&library, &user, "A", &[true, false]).await;
        let (b, _) = seed_series(&library, &user, "B", &[true, false]).await;

        let next = select_first(&library, &library, &user, &[a, b]).await.unwrap();
        assert_eq!(next.map(|n| n.episode), Some(a_episodes[1].clone()));
    }

    #[tokio::test]
    async fn test_select_names_picked_series_even_with_foreign_back_reference() {
        let user = User::new("alice");
        let picked = Series::new("A");
        let elsewhere = Series::new("Elsewhere");
        let s1e1 = Episode::new(&elsewhere, "S1E1", Some(1), Some(1));
        let s1e2 = Episode::new(&elsewhere, "S1E2", Some(1), Some(2));
        let watched_id = s1e1.id;
        let expected = s1e2.clone();

        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_list_episodes()
            .times(1)
            .returning(move |_| Ok(vec![s1e1.clone(), s1e2.clone()]));
        let mut watch_state = MockWatchStateProvider::new();
        watch_state
            .expect_is_watched()
            .returning(move |_, episode| Ok(episode.id == watched_id));

        let next = select_random(&catalog, &watch_state, &user, &[picked])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(next.series_name, "A");
        assert_eq!(next.episode, expected);
    }

    #[test]
    fn test_pick_series_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_series(&[], &mut rng), None);
    }

    #[test]
    fn test_pick_series_is_roughly_uniform() {
        let started: Vec<Series> = (0..4).map(|n| Series::new(format!("S{}", n))).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<_, usize> = HashMap::new();

        let draws = 4000;
        for _ in 0..draws {
            let picked = pick_series(&started, &mut rng).unwrap();
            *counts.entry(picked.id).or_default() += 1;
        }

        assert_eq!(counts.len(), started.len());
        for count in counts.values() {
            // Expected 1000 each
            assert!(*count > 800 && *count < 1200, "skewed draw: {}", count);
        }
    }
}
