use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use taskhub_models::{
    AuthResponse, CreateProjectDto, CreateSubtaskDto, CreateTaskDto, CreateUserDto,
    Organization, Project, Role, SignInRequest, SignUpRequest, Task, TaskPriority, TaskStatus,
    UpdateOrganizationDto, UpdateProjectDto, UpdateTaskDto, UpdateUserDto, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::sign_up,
        crate::modules::auth::controller::sign_in,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::organizations::controller::get_current_organization,
        crate::modules::organizations::controller::update_current_organization,
        crate::modules::organizations::controller::delete_current_organization,
        crate::modules::projects::controller::get_projects,
        crate::modules::projects::controller::get_project,
        crate::modules::projects::controller::create_project,
        crate::modules::projects::controller::update_project,
        crate::modules::projects::controller::delete_project,
        crate::modules::tasks::controller::get_tasks,
        crate::modules::tasks::controller::get_tasks_by_project,
        crate::modules::tasks::controller::get_task,
        crate::modules::tasks::controller::create_task,
        crate::modules::tasks::controller::create_subtask,
        crate::modules::tasks::controller::update_task,
        crate::modules::tasks::controller::delete_task,
    ),
    components(
        schemas(
            Role,
            User,
            CreateUserDto,
            UpdateUserDto,
            SignUpRequest,
            SignInRequest,
            AuthResponse,
            Organization,
            UpdateOrganizationDto,
            Project,
            CreateProjectDto,
            UpdateProjectDto,
            Task,
            TaskStatus,
            TaskPriority,
            CreateTaskDto,
            CreateSubtaskDto,
            UpdateTaskDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-up and sign-in"),
        (name = "Users", description = "Members of the caller's organization"),
        (name = "Organizations", description = "The caller's organization"),
        (name = "Projects", description = "Projects of the caller's organization"),
        (name = "Tasks", description = "Tasks and subtasks")
    ),
    info(
        title = "Taskhub API",
        version = "0.1.0",
        description = "Multi-tenant task management API built with Rust, Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_module_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/sign-up",
            "/users/{id}",
            "/organizations/current",
            "/projects/{id}",
            "/tasks/project/{project_id}",
            "/tasks/subtask",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
