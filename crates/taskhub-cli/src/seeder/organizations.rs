//! Organization seeding.

use fake::Fake;
use fake::faker::company::en::{CatchPhrase, CompanyName};
use rayon::prelude::*;
use sqlx::{Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::OrganizationSeed;
use super::truncate;

/// Generates organization data in parallel using Rayon
pub fn generate_organizations(count: usize) -> Vec<OrganizationSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let company: String = CompanyName().fake();
            let tagline: String = CatchPhrase().fake();
            OrganizationSeed {
                // Suffix keeps names distinct and at least three characters.
                name: truncate(&format!("{company} #{}", idx + 1), 50),
                description: Some(truncate(&tagline, 500)),
            }
        })
        .collect()
}

pub async fn seed_organizations(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏢 Seeding {} organizations...", count);

    let organizations = generate_organizations(count);
    let mut ids = Vec::with_capacity(organizations.len());
    for chunk in organizations.chunks(500) {
        ids.extend(insert_organizations_chunk(tx, chunk).await?);
    }

    println!(
        "   ✓ Inserted {} organizations in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

async fn insert_organizations_chunk(
    tx: &mut Transaction<'_, Postgres>,
    organizations: &[OrganizationSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if organizations.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO organizations (name, description) VALUES ");
    for i in 0..organizations.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 2;
        query.push_str(&format!("(${}, ${})", param_idx + 1, param_idx + 2));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for organization in organizations {
        q = q.bind(&organization.name).bind(&organization.description);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}
