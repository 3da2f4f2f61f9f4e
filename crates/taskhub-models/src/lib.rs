//! # Taskhub Models
//!
//! Domain models and DTOs for the Taskhub API: database entities,
//! request/response bodies and their validation rules.
//!
//! # Modules
//!
//! - [`auth`]: Sign-up and sign-in bodies
//! - [`organizations`]: Tenants
//! - [`users`]: Organization members
//! - [`projects`]: Projects owned by an organization
//! - [`tasks`]: Tasks and subtasks, with status and priority
//!
//! # Example
//!
//! ```ignore
//! use taskhub_models::tasks::{CreateTaskDto, TaskStatus};
//! use validator::Validate;
//!
//! let dto: CreateTaskDto = serde_json::from_value(body)?;
//! dto.validate()?;
//! assert_eq!(dto.status.unwrap_or_default(), TaskStatus::Todo);
//! ```

pub mod auth;
pub mod organizations;
pub mod projects;
pub mod tasks;
pub mod users;

pub use taskhub_auth::Role;

pub use auth::{AuthResponse, SignInRequest, SignUpRequest};
pub use organizations::{Organization, UpdateOrganizationDto};
pub use projects::{CreateProjectDto, Project, UpdateProjectDto};
pub use tasks::{
    CreateSubtaskDto, CreateTaskDto, Task, TaskPriority, TaskStatus, UpdateTaskDto,
};
pub use users::{CreateUserDto, UpdateUserDto, User};
