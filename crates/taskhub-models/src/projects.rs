use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub organization_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The owning organization is always the caller's.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProjectDto {
    #[validate(length(min = 3, max = 50))]
    #[schema(example = "Website relaunch")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProjectDto {
    #[validate(length(min = 3, max = 50))]
    pub name: Option<String>,
}
