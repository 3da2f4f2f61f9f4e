use axum::{Json, extract::Path, http::StatusCode};
use uuid::Uuid;

use taskhub_core::AppError;
use taskhub_models::projects::{CreateProjectDto, Project, UpdateProjectDto};

use crate::middleware::tenant::Tenant;
use crate::validator::ValidatedJson;

use super::service::ProjectService;

#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "Projects of the caller's organization", body = Vec<Project>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - owner or manager only")
    ),
    tag = "Projects",
    security(("bearer_auth" = []))
)]
pub async fn get_projects(Tenant(mut scope): Tenant) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(ProjectService::list(&mut scope).await?))
}

#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project details", body = Project),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - owner or manager only"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects",
    security(("bearer_auth" = []))
)]
pub async fn get_project(
    Tenant(mut scope): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(ProjectService::get(&mut scope, id).await?))
}

#[utoipa::path(
    post,
    path = "/projects",
    request_body = CreateProjectDto,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - owner or manager only"),
        (status = 422, description = "Validation error")
    ),
    tag = "Projects",
    security(("bearer_auth" = []))
)]
pub async fn create_project(
    Tenant(mut scope): Tenant,
    ValidatedJson(dto): ValidatedJson<CreateProjectDto>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = ProjectService::create(&mut scope, dto).await?;
    scope.commit().await?;
    Ok((StatusCode::CREATED, Json(project)))
}

#[utoipa::path(
    patch,
    path = "/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = UpdateProjectDto,
    responses(
        (status = 200, description = "Updated project", body = Project),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - owner or manager only"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects",
    security(("bearer_auth" = []))
)]
pub async fn update_project(
    Tenant(mut scope): Tenant,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProjectDto>,
) -> Result<Json<Project>, AppError> {
    let project = ProjectService::update(&mut scope, id, dto).await?;
    scope.commit().await?;
    Ok(Json(project))
}

#[utoipa::path(
    delete,
    path = "/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Deleted project", body = Project),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - owner or manager only"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects",
    security(("bearer_auth" = []))
)]
pub async fn delete_project(
    Tenant(mut scope): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    let project = ProjectService::delete(&mut scope, id).await?;
    scope.commit().await?;
    Ok(Json(project))
}
