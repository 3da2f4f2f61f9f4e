use tracing::{error, info, instrument};

use taskhub_core::AppError;
use taskhub_db::TenantScope;
use taskhub_models::organizations::{Organization, UpdateOrganizationDto};

const ORGANIZATION_COLUMNS: &str = "id, name, description, created_at, updated_at";

/// The caller's own organization. There is no way to address another one.
pub struct OrganizationService;

impl OrganizationService {
    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "SELECT", db.table = "organizations"))]
    pub async fn get_current(scope: &mut TenantScope) -> Result<Organization, AppError> {
        let tenant_id = scope.tenant_id();
        sqlx::query_as::<_, Organization>(&format!(
            "SELECT {ORGANIZATION_COLUMNS} FROM organizations WHERE id = $1"
        ))
        .bind(tenant_id)
        .fetch_optional(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching organization");
            AppError::database(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Organization not found")))
    }

    #[instrument(skip(scope, dto), fields(tenant.id = %scope.tenant_id(), db.operation = "UPDATE", db.table = "organizations"))]
    pub async fn update_current(
        scope: &mut TenantScope,
        dto: UpdateOrganizationDto,
    ) -> Result<Organization, AppError> {
        let tenant_id = scope.tenant_id();
        let organization = sqlx::query_as::<_, Organization>(&format!(
            "UPDATE organizations
             SET name = COALESCE($1, name),
                 description = COALESCE($2, description),
                 updated_at = NOW()
             WHERE id = $3
             RETURNING {ORGANIZATION_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(tenant_id)
        .fetch_optional(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error updating organization");
            AppError::database(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Organization not found")))?;

        info!(organization.id = %organization.id, "Organization updated");
        Ok(organization)
    }

    /// Deletes the organization and, through cascading keys, its members,
    /// projects and tasks.
    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "DELETE", db.table = "organizations"))]
    pub async fn delete_current(scope: &mut TenantScope) -> Result<Organization, AppError> {
        let tenant_id = scope.tenant_id();
        let organization = sqlx::query_as::<_, Organization>(&format!(
            "DELETE FROM organizations WHERE id = $1 RETURNING {ORGANIZATION_COLUMNS}"
        ))
        .bind(tenant_id)
        .fetch_optional(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error deleting organization");
            AppError::database(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Organization not found")))?;

        info!(organization.id = %organization.id, "Organization deleted");
        Ok(organization)
    }
}
