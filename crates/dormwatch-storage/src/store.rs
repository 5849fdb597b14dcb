//! Object store abstraction.

use async_trait::async_trait;
use bytes::Bytes;

use dormwatch_core::result::AppResult;

/// Backend-agnostic blob storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a blob under the given key, overwriting any existing one.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Fetch a blob by key. Missing keys map to `NotFound`.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Delete a blob by key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check backend connectivity.
    async fn health_check(&self) -> AppResult<bool>;
}
