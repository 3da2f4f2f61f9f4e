//! The request-authorization pipeline.
//!
//! Every protected route carries a [`pipeline::Pipeline`]: an ordered list of
//! [`guards::Guard`] values that [`pipeline::enforce`] evaluates one after the
//! other. The first rejection becomes the response and the handler never runs.
//!
//! # Modules
//!
//! - [`auth`]: bearer-token authentication and the [`auth::AuthUser`] extractor
//! - [`guards`]: the individual checks (role, same identity, tenant binding)
//! - [`tenant`]: handing the tenant-bound transaction to the handler
//! - [`pipeline`]: the composer
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::delete};
//! use crate::middleware::guards::Guard;
//! use crate::middleware::pipeline::{Pipeline, enforce};
//! use taskhub_auth::Role;
//!
//! let router = Router::new()
//!     .route("/{id}", delete(delete_user))
//!     .route_layer(middleware::from_fn_with_state(
//!         Pipeline::new(&state, [Guard::Authenticate, Guard::RequireRoles(&[Role::Owner]), Guard::BindTenant]),
//!         enforce,
//!     ));
//! ```

pub mod auth;
pub mod guards;
pub mod pipeline;
pub mod tenant;
