//! Deep Space Network module
//!
//! Fetches the DSN Now spacecraft directory and live telemetry feed and
//! regroups the active up/down-links by ground station and spacecraft.

pub mod aggregator;
pub mod directory;
pub mod error;
pub mod fetcher;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod stations;
pub mod types;

pub use directory::SpacecraftDirectory;
pub use error::{DsnError, FetchError};
pub use fetcher::{FeedSource, HttpFeedSource};
pub use pipeline::{DsnPipeline, FeedUrls};
pub use types::{Craft, Direction, DsnSnapshot, Signal, Station};
