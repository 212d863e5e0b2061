use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An episodic series as enumerated by the catalog
///
/// Episodes are not embedded; they are fetched separately and point back to
/// their series through [`Episode::series_id`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Series {
    /// Unique identifier for the series
    pub id: Uuid,
    /// Display name of the series
    pub name: String,
}

impl Series {
    /// Creates a new series with a random identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A single episode of a series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Episode {
    /// Unique identifier for the episode
    pub id: Uuid,
    /// Display name of the episode
    pub name: String,
    /// Lookup key of the parent series
    pub series_id: Uuid,
    /// Season number, when the catalog knows it
    #[serde(default)]
    pub season_number: Option<u32>,
    /// Episode number within the season, when the catalog knows it
    #[serde(default)]
    pub episode_number: Option<u32>,
}

impl Episode {
    /// Creates a new episode belonging to `series`
    pub fn new(
        series: &Series,
        name: impl Into<String>,
        season_number: Option<u32>,
        episode_number: Option<u32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            series_id: series.id,
            season_number,
            episode_number,
        }
    }

    /// Sort key for broadcast order; missing numbers count as 0
    pub fn broadcast_order(&self) -> (u32, u32) {
        (
            self.season_number.unwrap_or(0),
            self.episode_number.unwrap_or(0),
        )
    }
}

/// Sorts episodes into broadcast order
///
/// The sort is stable, so episodes sharing a (season, episode) key keep the
/// order the catalog returned them in.
pub fn sort_broadcast_order(episodes: &mut [Episode]) {
    episodes.sort_by_key(Episode::broadcast_order);
}

/// A recommended episode together with the name of its series
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NextEpisode {
    pub series_name: String,
    pub episode: Episode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_order_defaults_missing_numbers_to_zero() {
        let series = Series::new("Severance");
        let special = Episode::new(&series, "Special", None, None);
        let pilot = Episode::new(&series, "Good News About Hell", Some(1), Some(1));

        assert_eq!(special.broadcast_order(), (0, 0));
        assert_eq!(pilot.broadcast_order(), (1, 1));
    }

    #[test]
    fn test_sort_broadcast_order() {
        let series = Series::new("The Wire");
        let mut episodes = vec![
            Episode::new(&series, "S2E1", Some(2), Some(1)),
            Episode::new(&series, "S1E2", Some(1), Some(2)),
            Episode::new(&series, "Unnumbered", None, Some(5)),
            Episode::new(&series, "S1E1", Some(1), Some(1)),
        ];

        sort_broadcast_order(&mut episodes);

        let names: Vec<&str> = episodes.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Unnumbered", "S1E1", "S1E2", "S2E1"]);
    }

    #[test]
    fn test_sort_keeps_catalog_order_for_equal_keys() {
        let series = Series::new("Doctor Who");
        let mut episodes = vec![
            Episode::new(&series, "first", Some(1), None),
            Episode::new(&series, "second", Some(1), Some(0)),
            Episode::new(&series, "third", Some(1), None),
        ];

        sort_broadcast_order(&mut episodes);

        let names: Vec<&str> = episodes.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_episode_deserialization_without_numbers() {
        let json = r#"{
            "id": "6f1c1a52-3d43-4d6a-9d55-6f0b2b0f6a11",
            "name": "Christmas Special",
            "series_id": "0b0c7f5e-58b8-4f7a-9a3e-0d0c4b8c9e22"
        }"#;

        let episode: Episode = serde_json::from_str(json).unwrap();
        assert_eq!(episode.name, "Christmas Special");
        assert_eq!(episode.season_number, None);
        assert_eq!(episode.episode_number, None);
    }
}
