//! Next-episode recommendations over a user's watch history.
//!
//! Series the user has started but not finished are found by
//! [`services::classifier`]; [`services::selector`] picks one at random and
//! returns its next unwatched episode, and [`services::aggregator`] lists the
//! next episode across several of them. The host catalog is reached through
//! the traits in [`services::providers`].

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
