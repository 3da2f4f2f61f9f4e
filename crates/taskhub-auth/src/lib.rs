//! # Taskhub Auth
//!
//! Authentication types and the JWT token codec for the Taskhub API.
//!
//! - [`identity`]: [`Role`] and the per-request [`Identity`]
//! - [`claims`]: the JWT payload
//! - [`jwt`]: [`TokenCodec`], which signs identities into tokens and verifies them back
//!
//! # Example
//!
//! ```ignore
//! use taskhub_auth::{Identity, Role, TokenCodec};
//! use taskhub_config::JwtConfig;
//!
//! let codec = TokenCodec::new(&JwtConfig::from_env());
//! let token = codec.encode(&identity)?;
//! let decoded = codec.decode(&token)?;
//! assert_eq!(decoded, identity);
//! ```

pub mod claims;
pub mod identity;
pub mod jwt;

pub use claims::Claims;
pub use identity::{Identity, Role};
pub use jwt::{TokenCodec, TokenError};
