//! # dormwatch-core
//!
//! Core crate for Dormwatch. Contains configuration schemas, logging
//! setup, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Dormwatch crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
