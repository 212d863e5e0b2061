pub mod playback;
pub mod progress;
pub mod series;
pub mod user;

pub use playback::PlaybackCommand;
pub use progress::{ClassifiedSeries, ProgressClass};
pub use series::{sort_broadcast_order, Episode, NextEpisode, Series};
pub use user::User;
