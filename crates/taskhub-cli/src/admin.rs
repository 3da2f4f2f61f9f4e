//! Organization bootstrap.
//!
//! Sign-up can only join an existing organization, so the first organization
//! and its owner are created here.

use sqlx::PgPool;
use taskhub_core::hash_password;
use taskhub_models::{CreateUserDto, Role};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

pub struct NewOrganization<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub owner_name: &'a str,
    pub owner_email: &'a str,
    pub owner_password: &'a str,
}

/// Creates the organization and its OWNER in one transaction. Returns
/// `(organization_id, owner_id)`.
pub async fn create_organization_with_owner(
    db: &PgPool,
    new: NewOrganization<'_>,
) -> Result<(Uuid, Uuid), Box<dyn std::error::Error>> {
    let hashed_password = hash_password(new.owner_password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    let organization_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO organizations (name, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(new.name)
    .bind(new.description)
    .fetch_one(&mut *tx)
    .await?;

    let owner_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password, role, organization_id)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(new.owner_name)
    .bind(new.owner_email)
    .bind(&hashed_password)
    .bind(Role::Owner)
    .bind(organization_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(owner_id) = owner_id else {
        tx.rollback().await?;
        return Err("User with this email already exists".into());
    };

    tx.commit().await?;
    Ok((organization_id, owner_id))
}

/// Applies the API's rules for new members to the owner account.
pub fn check_owner_fields(name: &str, email: &str, password: &str) -> Result<(), ValidationErrors> {
    CreateUserDto {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: Some(Role::Owner),
    }
    .validate()
}
