pub mod supabase;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use supabase::SupabaseStore;

/// Remote collection store. Writes are blind inserts and reads are plain
/// selects; nothing does read-modify-write.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, collection: &str, row: Value) -> Result<()>;

    /// Rows of `collection`, newest first by `order_column`.
    async fn select_recent(
        &self,
        collection: &str,
        order_column: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Value>>;

    fn name(&self) -> &str;
}
