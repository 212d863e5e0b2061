pub mod aggregator;
pub mod classifier;
pub mod next_episode;
pub mod providers;
pub mod selector;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use next_episode::NextEpisodeService;
