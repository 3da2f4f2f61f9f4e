//! # Taskhub Core
//!
//! Core types, errors, and utilities for the Taskhub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use taskhub_core::errors::AppError;
//! use taskhub_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Project not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
