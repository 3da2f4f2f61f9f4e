//! Tasks and subtasks of the caller's organization.
//!
//! Every write checks that the referenced project, assignee and parent task
//! belong to the same organization before touching the table.

use sqlx::PgConnection;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use taskhub_core::AppError;
use taskhub_db::TenantScope;
use taskhub_models::tasks::{CreateSubtaskDto, CreateTaskDto, Task, UpdateTaskDto};

use crate::modules::projects::service::{self as projects, project_not_found};
use crate::modules::users::service as users;

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, project_id, \
                            user_id, parent_task_id, organization_id, created_at, updated_at";

fn task_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Task not found"))
}

pub struct TaskService;

impl TaskService {
    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "SELECT", db.table = "tasks"))]
    pub async fn list(scope: &mut TenantScope) -> Result<Vec<Task>, AppError> {
        let tenant_id = scope.tenant_id();
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE organization_id = $1 ORDER BY due_date, created_at"
        ))
        .bind(tenant_id)
        .fetch_all(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing tasks");
            AppError::database(e)
        })?;

        debug!(count = tasks.len(), "Tasks fetched");
        Ok(tasks)
    }

    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "SELECT", db.table = "tasks"))]
    pub async fn list_by_project(
        scope: &mut TenantScope,
        project_id: Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let tenant_id = scope.tenant_id();
        projects::find_in_tenant(scope.conn(), tenant_id, project_id)
            .await?
            .ok_or_else(project_not_found)?;

        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE organization_id = $1 AND project_id = $2
             ORDER BY due_date, created_at"
        ))
        .bind(tenant_id)
        .bind(project_id)
        .fetch_all(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing project tasks");
            AppError::database(e)
        })
    }

    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "SELECT", db.table = "tasks"))]
    pub async fn get(scope: &mut TenantScope, id: Uuid) -> Result<Task, AppError> {
        let tenant_id = scope.tenant_id();
        find_in_tenant(scope.conn(), tenant_id, id)
            .await?
            .ok_or_else(task_not_found)
    }

    #[instrument(skip(scope, dto), fields(tenant.id = %scope.tenant_id(), db.operation = "INSERT", db.table = "tasks"))]
    pub async fn create(scope: &mut TenantScope, dto: CreateTaskDto) -> Result<Task, AppError> {
        insert(scope, dto, None).await
    }

    /// Like [`TaskService::create`], under a parent task of the same project.
    #[instrument(skip(scope, dto), fields(tenant.id = %scope.tenant_id(), parent.id = %dto.parent_task_id, db.operation = "INSERT", db.table = "tasks"))]
    pub async fn create_subtask(
        scope: &mut TenantScope,
        dto: CreateSubtaskDto,
    ) -> Result<Task, AppError> {
        let tenant_id = scope.tenant_id();
        let parent = find_in_tenant(scope.conn(), tenant_id, dto.parent_task_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Parent task not found")))?;

        if parent.project_id != dto.task.project_id {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Subtask must belong to the parent task's project"
            )));
        }

        insert(scope, dto.task, Some(parent.id)).await
    }

    #[instrument(skip(scope, dto), fields(tenant.id = %scope.tenant_id(), db.operation = "UPDATE", db.table = "tasks"))]
    pub async fn update(
        scope: &mut TenantScope,
        id: Uuid,
        dto: UpdateTaskDto,
    ) -> Result<Task, AppError> {
        let tenant_id = scope.tenant_id();

        let current = find_in_tenant(scope.conn(), tenant_id, id)
            .await?
            .ok_or_else(task_not_found)?;
        if let Some(project_id) = dto.project_id {
            if current.parent_task_id.is_some() && project_id != current.project_id {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Subtask must belong to the parent task's project"
                )));
            }
            ensure_project(scope.conn(), tenant_id, project_id).await?;
        }
        if let Some(user_id) = dto.user_id {
            ensure_assignee(scope.conn(), tenant_id, user_id).await?;
        }

        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks
             SET title = COALESCE($1, title),
                 description = COALESCE($2, description),
                 project_id = COALESCE($3, project_id),
                 status = COALESCE($4, status),
                 priority = COALESCE($5, priority),
                 due_date = COALESCE($6, due_date),
                 user_id = COALESCE($7, user_id),
                 updated_at = NOW()
             WHERE id = $8 AND organization_id = $9
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.project_id)
        .bind(dto.status)
        .bind(dto.priority)
        .bind(dto.due_date)
        .bind(dto.user_id)
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating task");
            AppError::database(e)
        })?
        .ok_or_else(task_not_found)?;

        if task.project_id != current.project_id {
            move_subtasks(scope.conn(), tenant_id, task.id, task.project_id).await?;
        }

        info!(task.id = %task.id, task.status = ?task.status, "Task updated");
        Ok(task)
    }

    /// Removes the task and its subtasks.
    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "DELETE", db.table = "tasks"))]
    pub async fn delete(scope: &mut TenantScope, id: Uuid) -> Result<Task, AppError> {
        let tenant_id = scope.tenant_id();
        let task = sqlx::query_as::<_, Task>(&format!(
            "DELETE FROM tasks WHERE id = $1 AND organization_id = $2 RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error deleting task");
            AppError::database(e)
        })?
        .ok_or_else(task_not_found)?;

        info!(task.id = %task.id, "Task deleted");
        Ok(task)
    }
}

async fn insert(
    scope: &mut TenantScope,
    dto: CreateTaskDto,
    parent_task_id: Option<Uuid>,
) -> Result<Task, AppError> {
    let tenant_id = scope.tenant_id();
    ensure_project(scope.conn(), tenant_id, dto.project_id).await?;
    ensure_assignee(scope.conn(), tenant_id, dto.user_id).await?;

    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks
            (title, description, status, priority, due_date, project_id, user_id, parent_task_id, organization_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(&dto.title)
    .bind(&dto.description)
    .bind(dto.status.unwrap_or_default())
    .bind(dto.priority.unwrap_or_default())
    .bind(dto.due_date)
    .bind(dto.project_id)
    .bind(dto.user_id)
    .bind(parent_task_id)
    .bind(tenant_id)
    .fetch_one(scope.conn())
    .await
    .map_err(|e| {
        error!(error = %e, "Database error creating task");
        AppError::database(e)
    })?;

    info!(task.id = %task.id, project.id = %task.project_id, "Task created");
    Ok(task)
}

/// Moves every descendant of `parent_id` into `project_id`.
async fn move_subtasks(
    conn: &mut PgConnection,
    tenant_id: Uuid,
    parent_id: Uuid,
    project_id: Uuid,
) -> Result<(), AppError> {
    let moved = sqlx::query(
        "WITH RECURSIVE descendants AS (
             SELECT id FROM tasks WHERE parent_task_id = $1 AND organization_id = $3
             UNION ALL
             SELECT t.id FROM tasks t
             JOIN descendants d ON t.parent_task_id = d.id
             WHERE t.organization_id = $3
         )
         UPDATE tasks SET project_id = $2, updated_at = NOW()
         WHERE id IN (SELECT id FROM descendants) AND organization_id = $3",
    )
    .bind(parent_id)
    .bind(project_id)
    .bind(tenant_id)
    .execute(conn)
    .await
    .map_err(|e| {
        error!(task.id = %parent_id, error = %e, "Database error moving subtasks");
        AppError::database(e)
    })?
    .rows_affected();

    debug!(task.id = %parent_id, moved, "Subtasks moved with parent");
    Ok(())
}

async fn ensure_project(
    conn: &mut PgConnection,
    tenant_id: Uuid,
    project_id: Uuid,
) -> Result<(), AppError> {
    projects::find_in_tenant(conn, tenant_id, project_id)
        .await?
        .map(|_| ())
        .ok_or_else(project_not_found)
}

async fn ensure_assignee(
    conn: &mut PgConnection,
    tenant_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    if users::find_in_tenant(conn, tenant_id, user_id).await?.is_none() {
        warn!(user.id = %user_id, "Assignee outside the organization");
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Assignee must belong to your organization"
        )));
    }
    Ok(())
}

async fn find_in_tenant(
    conn: &mut PgConnection,
    tenant_id: Uuid,
    id: Uuid,
) -> Result<Option<Task>, AppError> {
    sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND organization_id = $2"
    ))
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(conn)
    .await
    .map_err(|e| {
        error!(task.id = %id, error = %e, "Database error fetching task");
        AppError::database(e)
    })
}
