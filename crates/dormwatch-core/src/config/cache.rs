//! Redis connection configuration.

use serde::{Deserialize, Serialize};

/// Redis configuration.
///
/// Dormwatch uses Redis purely as a pub/sub side-channel for
/// notification change events; nothing is cached in it. Channel names
/// are part of the contract with the subscription transport and are
/// therefore not prefixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}
