mod file;
mod inmemory;

pub use file::FileKVRepo;
pub use inmemory::InMemoryKVRepo;

/// Small persisted key value store. Values are always overwritten as a
/// whole, there are no partial updates.
#[async_trait::async_trait]
pub trait IKVRepo: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Deleting a missing key is not an error
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}
