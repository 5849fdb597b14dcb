//! # dormwatch-cache
//!
//! Redis connectivity and the pub/sub channels used to push
//! unread-count change signals to interested transports.

pub mod channels;
pub mod publisher;
pub mod redis;

pub use crate::publisher::ChangePublisher;
pub use crate::redis::RedisClient;
