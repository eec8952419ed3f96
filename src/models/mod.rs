pub mod stats;
pub mod repository;
pub mod record;

pub use stats::*;
pub use repository::*;
pub use record::*;
