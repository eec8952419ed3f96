pub mod config;
pub mod error;
pub mod models;
pub mod leetcode;
pub mod github;
pub mod store;
pub mod aggregator;
pub mod gateway;
pub mod feed;
pub mod screen;

pub use config::{Config, StoreConfig};
pub use error::{Error, Result, SubmissionError};
pub use aggregator::{Overview, RemoteStatsAggregator};
pub use gateway::FormSubmissionGateway;
pub use feed::TestimonialFeed;
pub use store::{RecordStore, SupabaseStore};
