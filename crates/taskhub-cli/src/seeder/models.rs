//! Seed rows and the knobs that size a seeding run.

use chrono::NaiveDate;
use taskhub_models::{Role, TaskPriority, TaskStatus};
use uuid::Uuid;

/// Every seeded account uses this email domain, which is how `clear-seed`
/// finds them again.
pub const SEED_EMAIL_DOMAIN: &str = "seed.taskhub.dev";

/// Plain-text password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

pub struct OrganizationSeed {
    pub name: String,
    pub description: Option<String>,
}

pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub organization_id: Uuid,
}

pub struct ProjectSeed {
    pub name: String,
    pub organization_id: Uuid,
}

pub struct TaskSeed {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,
}

/// Accounts per organization. Each organization also gets one OWNER.
#[derive(Clone)]
pub struct UsersPerOrganization {
    pub managers: usize,
    pub members: usize,
}

impl Default for UsersPerOrganization {
    fn default() -> Self {
        Self {
            managers: 2,
            members: 10,
        }
    }
}

#[derive(Clone)]
pub struct SeedConfig {
    pub num_organizations: usize,
    pub users_per_organization: UsersPerOrganization,
    pub projects_per_organization: usize,
    pub tasks_per_project: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_organizations: 3,
            users_per_organization: UsersPerOrganization::default(),
            projects_per_organization: 4,
            tasks_per_project: 20,
        }
    }
}

impl SeedConfig {
    pub fn new(num_organizations: usize) -> Self {
        Self {
            num_organizations,
            ..Default::default()
        }
    }

    pub fn with_users(mut self, users: UsersPerOrganization) -> Self {
        self.users_per_organization = users;
        self
    }

    pub fn with_projects(mut self, projects: usize, tasks_per_project: usize) -> Self {
        self.projects_per_organization = projects;
        self.tasks_per_project = tasks_per_project;
        self
    }

    /// Owner included.
    pub fn users_per_organization(&self) -> usize {
        1 + self.users_per_organization.managers + self.users_per_organization.members
    }

    pub fn total_users(&self) -> usize {
        self.num_organizations * self.users_per_organization()
    }

    pub fn total_tasks(&self) -> usize {
        self.num_organizations * self.projects_per_organization * self.tasks_per_project
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_include_owner() {
        let config = SeedConfig::new(2)
            .with_users(UsersPerOrganization {
                managers: 1,
                members: 3,
            })
            .with_projects(2, 5);

        assert_eq!(config.users_per_organization(), 5);
        assert_eq!(config.total_users(), 10);
        assert_eq!(config.total_tasks(), 20);
    }
}
