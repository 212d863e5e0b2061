use crate::{
    models::{Episode, Series, User},
    services::providers::InMemoryLibrary,
};

/// Library with a single registered user
pub async fn library_with_user() -> (InMemoryLibrary, User) {
    let library = InMemoryLibrary::new();
    let user = User::new("alice");
    library.add_user(user.clone()).await;
    (library, user)
}

/// Adds a one-season series whose episode `n` is watched when `watched[n]` is set
pub async fn seed_series(
    library: &InMemoryLibrary,
    user: &User,
    name: &str,
    watched: &[bool],
) -> (Series, Vec<Episode>) {
    let series = Series::new(name);
    library.add_series(series.clone()).await;

    let mut episodes = Vec::new();
    for (index, is_watched) in watched.iter().enumerate() {
        let number = index as u32 + 1;
        let episode = Episode::new(&series, format!("S1E{}", number), Some(1), Some(number));
        library.add_episode(episode.clone()).await;
        if *is_watched {
            library.mark_watched(user.id, episode.id).await;
        }
        episodes.push(episode);
    }

    (series, episodes)
}
