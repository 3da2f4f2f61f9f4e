//! # Taskhub CLI
//!
//! Administrative and seeding utilities for Taskhub development.
//!
//! This library crate provides the functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use taskhub_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(3); // 3 organizations with defaults
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
