//! Fake data for local development.
//!
//! A run inserts organizations, their users, projects and tasks inside a
//! single transaction: either everything lands or nothing does. Every seeded
//! account uses the [`SEED_EMAIL_DOMAIN`] email domain so [`clear_all`] can
//! remove the data later without touching real accounts.

pub mod models;
pub mod organizations;
pub mod projects;
pub mod tasks;
pub mod users;

use sqlx::PgPool;
use std::time::Instant;
use taskhub_core::hash_password;

pub use models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig, UsersPerOrganization};

/// Summary of a finished seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub organizations: usize,
    pub users: usize,
    pub projects: usize,
    pub tasks: usize,
}

pub async fn seed_all(
    db: &PgPool,
    config: SeedConfig,
) -> Result<SeedReport, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} organizations ({} users, {} tasks in total)\n",
        config.num_organizations,
        config.total_users(),
        config.total_tasks()
    );

    // bcrypt is slow; every seeded account shares one hash.
    let password_hash = hash_password(SEED_PASSWORD)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    let organization_ids =
        organizations::seed_organizations(&mut tx, config.num_organizations).await?;
    let users_by_organization = users::seed_users(
        &mut tx,
        &organization_ids,
        &config.users_per_organization,
        &password_hash,
    )
    .await?;
    let projects =
        projects::seed_projects(&mut tx, &organization_ids, config.projects_per_organization)
            .await?;
    let tasks = tasks::seed_tasks(
        &mut tx,
        &projects,
        &users_by_organization,
        config.tasks_per_project,
    )
    .await?;

    tx.commit().await?;

    let report = SeedReport {
        organizations: organization_ids.len(),
        users: users_by_organization.values().map(Vec::len).sum(),
        projects: projects.len(),
        tasks,
    };

    println!("\n🎉 Seeding finished in {:?}", start_time.elapsed());
    println!(
        "   Sign in as any seeded account with password `{}`",
        SEED_PASSWORD
    );
    Ok(report)
}

pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    users::clear_seeded(db).await?;
    Ok(())
}

/// Cuts `s` to at most `max` characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
