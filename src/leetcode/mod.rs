pub mod client;
pub mod payload;

pub use client::StatsClient;
pub use payload::StatsPayload;
