//! Project seeding.

use fake::Fake;
use fake::faker::company::en::Buzzword;
use rayon::prelude::*;
use sqlx::{Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::ProjectSeed;
use super::truncate;

pub fn generate_projects(organization_ids: &[Uuid], per_organization: usize) -> Vec<ProjectSeed> {
    organization_ids
        .par_iter()
        .flat_map(|&organization_id| {
            (0..per_organization)
                .map(|idx| {
                    let word: String = Buzzword().fake();
                    ProjectSeed {
                        name: truncate(&format!("{word} project {}", idx + 1), 50),
                        organization_id,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Returns `(project_id, organization_id)` pairs.
pub async fn seed_projects(
    tx: &mut Transaction<'_, Postgres>,
    organization_ids: &[Uuid],
    per_organization: usize,
) -> Result<Vec<(Uuid, Uuid)>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📁 Seeding {} projects per organization...", per_organization);

    let projects = generate_projects(organization_ids, per_organization);
    let mut seeded = Vec::with_capacity(projects.len());
    for chunk in projects.chunks(1000) {
        let ids = insert_projects_chunk(tx, chunk).await?;
        seeded.extend(ids.into_iter().zip(chunk.iter().map(|p| p.organization_id)));
    }

    println!(
        "   ✓ Inserted {} projects in {:?}",
        seeded.len(),
        start_time.elapsed()
    );
    Ok(seeded)
}

async fn insert_projects_chunk(
    tx: &mut Transaction<'_, Postgres>,
    projects: &[ProjectSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if projects.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO projects (name, organization_id) VALUES ");
    for i in 0..projects.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 2;
        query.push_str(&format!("(${}, ${})", param_idx + 1, param_idx + 2));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for project in projects {
        q = q.bind(&project.name).bind(project.organization_id);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_per_organization() {
        let orgs = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let projects = generate_projects(&orgs, 4);
        assert_eq!(projects.len(), 12);
        for org in orgs {
            assert_eq!(projects.iter().filter(|p| p.organization_id == org).count(), 4);
        }
        assert!(projects.iter().all(|p| (3..=50).contains(&p.name.chars().count())));
    }
}
