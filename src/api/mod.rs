//! API clients for external services
//!
//! - TMDB: movie/series lists, search, recommendations, seasons

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbError};
