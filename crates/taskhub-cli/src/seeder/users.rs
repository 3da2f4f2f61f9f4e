//! User seeding: one OWNER plus managers and members per organization.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::time::Instant;
use taskhub_models::Role;
use uuid::Uuid;

use super::models::{SEED_EMAIL_DOMAIN, UserSeed, UsersPerOrganization};
use super::truncate;

/// Generates every account for the given organizations, in parallel.
pub fn generate_users(
    organization_ids: &[Uuid],
    per_organization: &UsersPerOrganization,
    password_hash: &str,
) -> Vec<UserSeed> {
    organization_ids
        .par_iter()
        .enumerate()
        .flat_map(|(org_idx, &organization_id)| {
            let roles = std::iter::once(Role::Owner)
                .chain(std::iter::repeat_n(Role::Manager, per_organization.managers))
                .chain(std::iter::repeat_n(Role::User, per_organization.members));

            roles
                .enumerate()
                .map(|(user_idx, role)| {
                    generate_user(role, organization_id, org_idx, user_idx, password_hash)
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn generate_user(
    role: Role,
    organization_id: Uuid,
    org_idx: usize,
    user_idx: usize,
    password_hash: &str,
) -> UserSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    // Indexes keep emails unique across a run.
    let email = format!(
        "{}.{}+{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        role.as_str().to_lowercase(),
        org_idx * 10_000 + user_idx,
        SEED_EMAIL_DOMAIN
    );

    UserSeed {
        name: truncate(&format!("{first_name} {last_name}"), 50),
        email,
        password_hash: password_hash.to_string(),
        role,
        organization_id,
    }
}

/// Inserts the users and returns their ids grouped by organization.
pub async fn seed_users(
    tx: &mut Transaction<'_, Postgres>,
    organization_ids: &[Uuid],
    per_organization: &UsersPerOrganization,
    password_hash: &str,
) -> Result<HashMap<Uuid, Vec<Uuid>>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "👥 Seeding users (1 owner, {} managers, {} members per organization)...",
        per_organization.managers, per_organization.members
    );

    let users = generate_users(organization_ids, per_organization, password_hash);

    // 5 params per user
    const BATCH_SIZE: usize = 1000;

    let mut by_organization: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for chunk in users.chunks(BATCH_SIZE) {
        let ids = insert_users_chunk(tx, chunk).await?;
        for (id, seed) in ids.into_iter().zip(chunk) {
            by_organization.entry(seed.organization_id).or_default().push(id);
        }
    }

    println!(
        "   ✓ Inserted {} users in {:?}",
        users.len(),
        start_time.elapsed()
    );
    Ok(by_organization)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query =
        String::from("INSERT INTO users (name, email, password, role, organization_id) VALUES ");
    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4,
            param_idx + 5
        ));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for user in users {
        q = q
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(user.organization_id);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

/// Deletes seeded organizations (cascading to their projects and tasks),
/// then any seeded account left outside them.
pub async fn clear_seeded(db: &PgPool) -> Result<(u64, u64), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let pattern = format!("%@{SEED_EMAIL_DOMAIN}");
    let mut tx = db.begin().await?;

    let organizations = sqlx::query(
        "DELETE FROM organizations
         WHERE id IN (SELECT organization_id FROM users WHERE email LIKE $1)",
    )
    .bind(&pattern)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let users = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} organizations and {} remaining users in {:?}",
        organizations,
        users,
        start_time.elapsed()
    );
    Ok((organizations, users))
}
