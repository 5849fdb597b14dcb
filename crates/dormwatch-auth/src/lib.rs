//! # dormwatch-auth
//!
//! Password hashing (Argon2id) and JWT issuance/validation.

pub mod jwt;
pub mod password;

pub use jwt::claims::Claims;
pub use jwt::decoder::JwtDecoder;
pub use jwt::encoder::JwtEncoder;
pub use password::hasher::PasswordHasher;
