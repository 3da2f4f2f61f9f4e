use axum::Json;

use taskhub_core::AppError;
use taskhub_models::organizations::{Organization, UpdateOrganizationDto};

use crate::middleware::tenant::Tenant;
use crate::validator::ValidatedJson;

use super::service::OrganizationService;

#[utoipa::path(
    get,
    path = "/organizations/current",
    responses(
        (status = 200, description = "The caller's organization", body = Organization),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No organization"),
        (status = 404, description = "Organization not found")
    ),
    tag = "Organizations",
    security(("bearer_auth" = []))
)]
pub async fn get_current_organization(
    Tenant(mut scope): Tenant,
) -> Result<Json<Organization>, AppError> {
    Ok(Json(OrganizationService::get_current(&mut scope).await?))
}

#[utoipa::path(
    patch,
    path = "/organizations/current",
    request_body = UpdateOrganizationDto,
    responses(
        (status = 200, description = "Updated organization", body = Organization),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - owner only"),
        (status = 404, description = "Organization not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Organizations",
    security(("bearer_auth" = []))
)]
pub async fn update_current_organization(
    Tenant(mut scope): Tenant,
    ValidatedJson(dto): ValidatedJson<UpdateOrganizationDto>,
) -> Result<Json<Organization>, AppError> {
    if dto.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!("Nothing to update")));
    }

    let organization = OrganizationService::update_current(&mut scope, dto).await?;
    scope.commit().await?;
    Ok(Json(organization))
}

#[utoipa::path(
    delete,
    path = "/organizations/current",
    responses(
        (status = 200, description = "Deleted organization", body = Organization),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - owner only"),
        (status = 404, description = "Organization not found")
    ),
    tag = "Organizations",
    security(("bearer_auth" = []))
)]
pub async fn delete_current_organization(
    Tenant(mut scope): Tenant,
) -> Result<Json<Organization>, AppError> {
    let organization = OrganizationService::delete_current(&mut scope).await?;
    scope.commit().await?;
    Ok(Json(organization))
}
