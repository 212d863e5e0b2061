use serde::{Deserialize, Serialize};

use super::Series;

/// How far a user has got through a series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProgressClass {
    /// No episode watched
    NotStarted,
    /// At least one episode watched and at least one unwatched
    InProgress,
    /// Every episode watched
    Finished,
}

impl ProgressClass {
    /// Classifies a series from its watched and total episode counts
    ///
    /// Returns `None` for a series without episodes.
    pub fn from_counts(watched: usize, total: usize) -> Option<Self> {
        match (watched, total) {
            (_, 0) => None,
            (0, _) => Some(ProgressClass::NotStarted),
            (w, t) if w >= t => Some(ProgressClass::Finished),
            _ => Some(ProgressClass::InProgress),
        }
    }
}

/// A series paired with its progress class for one user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClassifiedSeries {
    pub series: Series,
    pub progress: ProgressClass,
}
