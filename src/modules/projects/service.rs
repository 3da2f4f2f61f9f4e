use sqlx::PgConnection;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use taskhub_core::AppError;
use taskhub_db::TenantScope;
use taskhub_models::projects::{CreateProjectDto, Project, UpdateProjectDto};

const PROJECT_COLUMNS: &str = "id, name, organization_id, created_at, updated_at";

pub struct ProjectService;

impl ProjectService {
    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "SELECT", db.table = "projects"))]
    pub async fn list(scope: &mut TenantScope) -> Result<Vec<Project>, AppError> {
        let tenant_id = scope.tenant_id();
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE organization_id = $1 ORDER BY created_at"
        ))
        .bind(tenant_id)
        .fetch_all(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing projects");
            AppError::database(e)
        })?;

        debug!(count = projects.len(), "Projects fetched");
        Ok(projects)
    }

    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "SELECT", db.table = "projects"))]
    pub async fn get(scope: &mut TenantScope, id: Uuid) -> Result<Project, AppError> {
        let tenant_id = scope.tenant_id();
        find_in_tenant(scope.conn(), tenant_id, id)
            .await?
            .ok_or_else(project_not_found)
    }

    #[instrument(skip(scope, dto), fields(tenant.id = %scope.tenant_id(), project.name = %dto.name, db.operation = "INSERT", db.table = "projects"))]
    pub async fn create(scope: &mut TenantScope, dto: CreateProjectDto) -> Result<Project, AppError> {
        let tenant_id = scope.tenant_id();
        let project = sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects (name, organization_id) VALUES ($1, $2) RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(tenant_id)
        .fetch_one(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error creating project");
            AppError::database(e)
        })?;

        info!(project.id = %project.id, "Project created");
        Ok(project)
    }

    #[instrument(skip(scope, dto), fields(tenant.id = %scope.tenant_id(), db.operation = "UPDATE", db.table = "projects"))]
    pub async fn update(
        scope: &mut TenantScope,
        id: Uuid,
        dto: UpdateProjectDto,
    ) -> Result<Project, AppError> {
        let tenant_id = scope.tenant_id();
        let project = sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects
             SET name = COALESCE($1, name), updated_at = NOW()
             WHERE id = $2 AND organization_id = $3
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating project");
            AppError::database(e)
        })?
        .ok_or_else(project_not_found)?;

        info!(project.id = %project.id, "Project updated");
        Ok(project)
    }

    /// Removes the project together with its tasks.
    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "DELETE", db.table = "projects"))]
    pub async fn delete(scope: &mut TenantScope, id: Uuid) -> Result<Project, AppError> {
        let tenant_id = scope.tenant_id();
        let project = sqlx::query_as::<_, Project>(&format!(
            "DELETE FROM projects WHERE id = $1 AND organization_id = $2 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error deleting project");
            AppError::database(e)
        })?
        .ok_or_else(project_not_found)?;

        info!(project.id = %project.id, "Project deleted");
        Ok(project)
    }
}

pub(crate) fn project_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Project not found"))
}

pub(crate) async fn find_in_tenant(
    conn: &mut PgConnection,
    tenant_id: Uuid,
    id: Uuid,
) -> Result<Option<Project>, AppError> {
    sqlx::query_as::<_, Project>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND organization_id = $2"
    ))
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(conn)
    .await
    .map_err(|e| {
        error!(project.id = %id, error = %e, "Database error fetching project");
        AppError::database(e)
    })
}
