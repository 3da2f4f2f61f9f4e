//! Task seeding. Assignees always come from the project's own organization.

use chrono::{Days, Utc};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rayon::prelude::*;
use sqlx::{Postgres, Transaction};
use std::collections::HashMap;
use std::time::Instant;
use taskhub_models::{TaskPriority, TaskStatus};
use uuid::Uuid;

use super::models::TaskSeed;
use super::truncate;

const STATUSES: [TaskStatus; 4] = [
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::Completed,
    TaskStatus::Blocked,
];
const PRIORITIES: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

/// Projects whose organization has no users get no tasks.
pub fn generate_tasks(
    projects: &[(Uuid, Uuid)],
    users_by_organization: &HashMap<Uuid, Vec<Uuid>>,
    per_project: usize,
) -> Vec<TaskSeed> {
    let today = Utc::now().date_naive();

    projects
        .par_iter()
        .filter_map(|&(project_id, organization_id)| {
            let assignees = users_by_organization.get(&organization_id)?;
            if assignees.is_empty() {
                return None;
            }
            let tasks = (0..per_project)
                .map(|_| {
                    let title: String = Sentence(2..5).fake();
                    let description: String = Paragraph(1..3).fake();
                    let days: u64 = (1..120).fake();
                    TaskSeed {
                        title: truncate(title.trim_end_matches('.'), 50),
                        description: truncate(&description, 500),
                        status: STATUSES[(0..STATUSES.len()).fake::<usize>()],
                        priority: PRIORITIES[(0..PRIORITIES.len()).fake::<usize>()],
                        due_date: today.checked_add_days(Days::new(days)).unwrap_or(today),
                        project_id,
                        user_id: assignees[(0..assignees.len()).fake::<usize>()],
                        organization_id,
                    }
                })
                .collect::<Vec<_>>();
            Some(tasks)
        })
        .flatten()
        .collect()
}

pub async fn seed_tasks(
    tx: &mut Transaction<'_, Postgres>,
    projects: &[(Uuid, Uuid)],
    users_by_organization: &HashMap<Uuid, Vec<Uuid>>,
    per_project: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("✅ Seeding {} tasks per project...", per_project);

    let tasks = generate_tasks(projects, users_by_organization, per_project);

    // 8 params per task
    const BATCH_SIZE: usize = 1000;
    for chunk in tasks.chunks(BATCH_SIZE) {
        insert_tasks_chunk(tx, chunk).await?;
    }

    println!(
        "   ✓ Inserted {} tasks in {:?}",
        tasks.len(),
        start_time.elapsed()
    );
    Ok(tasks.len())
}

async fn insert_tasks_chunk(
    tx: &mut Transaction<'_, Postgres>,
    tasks: &[TaskSeed],
) -> Result<(), Box<dyn std::error::Error>> {
    if tasks.is_empty() {
        return Ok(());
    }

    let mut query = String::from(
        "INSERT INTO tasks (title, description, status, priority, due_date, project_id, user_id, organization_id) VALUES ",
    );
    for i in 0..tasks.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 8;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6,
            p + 7,
            p + 8
        ));
    }

    let mut q = sqlx::query(&query);
    for task in tasks {
        q = q
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.status)
            .bind(task.priority)
            .bind(task.due_date)
            .bind(task.project_id)
            .bind(task.user_id)
            .bind(task.organization_id);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignees_stay_in_organization() {
        let acme = Uuid::new_v4();
        let globex = Uuid::new_v4();
        let acme_users = vec![Uuid::new_v4(), Uuid::new_v4()];
        let users = HashMap::from([(acme, acme_users.clone()), (globex, vec![])]);
        let projects = [(Uuid::new_v4(), acme), (Uuid::new_v4(), globex)];

        let tasks = generate_tasks(&projects, &users, 10);

        // The project of the empty organization is skipped.
        assert_eq!(tasks.len(), 10);
        for task in &tasks {
            assert_eq!(task.organization_id, acme);
            assert!(acme_users.contains(&task.user_id));
            assert!(task.title.chars().count() <= 50);
            assert!(task.description.chars().count() <= 500);
            assert!(task.due_date > Utc::now().date_naive());
        }
    }
}
