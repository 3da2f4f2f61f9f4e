use axum::{Json, extract::Path, http::StatusCode};
use uuid::Uuid;

use taskhub_core::AppError;
use taskhub_models::tasks::{CreateSubtaskDto, CreateTaskDto, Task, UpdateTaskDto};

use crate::middleware::tenant::Tenant;
use crate::validator::ValidatedJson;

use super::service::TaskService;

#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "Tasks of the caller's organization", body = Vec<Task>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No organization")
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_tasks(Tenant(mut scope): Tenant) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(TaskService::list(&mut scope).await?))
}

#[utoipa::path(
    get,
    path = "/tasks/project/{project_id}",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Tasks of the project", body = Vec<Task>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_tasks_by_project(
    Tenant(mut scope): Tenant,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(TaskService::list_by_project(&mut scope, project_id).await?))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task details", body = Task),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_task(
    Tenant(mut scope): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, AppError> {
    Ok(Json(TaskService::get(&mut scope, id).await?))
}

#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTaskDto,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Malformed body or assignee outside the organization"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    Tenant(mut scope): Tenant,
    ValidatedJson(dto): ValidatedJson<CreateTaskDto>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = TaskService::create(&mut scope, dto).await?;
    scope.commit().await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    post,
    path = "/tasks/subtask",
    request_body = CreateSubtaskDto,
    responses(
        (status = 201, description = "Subtask created", body = Task),
        (status = 400, description = "Malformed body, foreign assignee or project mismatch"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project or parent task not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
pub async fn create_subtask(
    Tenant(mut scope): Tenant,
    ValidatedJson(dto): ValidatedJson<CreateSubtaskDto>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = TaskService::create_subtask(&mut scope, dto).await?;
    scope.commit().await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    patch,
    path = "/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = UpdateTaskDto,
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 400, description = "Malformed body or assignee outside the organization"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task or project not found")
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
pub async fn update_task(
    Tenant(mut scope): Tenant,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTaskDto>,
) -> Result<Json<Task>, AppError> {
    let task = TaskService::update(&mut scope, id, dto).await?;
    scope.commit().await?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Deleted task", body = Task),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
pub async fn delete_task(
    Tenant(mut scope): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, AppError> {
    let task = TaskService::delete(&mut scope, id).await?;
    scope.commit().await?;
    Ok(Json(task))
}
