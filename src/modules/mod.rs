//! Feature modules. Each one splits into `controller` (HTTP handlers),
//! `service` (queries and rules) and `router` (routes plus their guards).

pub mod auth;
pub mod organizations;
pub mod projects;
pub mod tasks;
pub mod users;
