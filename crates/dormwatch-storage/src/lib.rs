//! # dormwatch-storage
//!
//! S3-compatible object storage for report image attachments.

pub mod keys;
pub mod s3;
pub mod store;

pub use s3::S3ObjectStore;
pub use store::ObjectStore;
