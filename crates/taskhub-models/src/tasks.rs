//! Tasks and subtasks.
//!
//! A subtask is a task whose `parent_task_id` points at another task of the
//! same organization.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
    Blocked,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "task_priority", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(serialize_with = "serialize_date")]
    pub due_date: NaiveDate,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub parent_task_id: Option<Uuid>,
    pub organization_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTaskDto {
    #[validate(length(min = 3, max = 50))]
    #[schema(example = "Write release notes")]
    pub title: String,
    #[validate(length(min = 3, max = 500))]
    pub description: String,
    pub project_id: Uuid,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(deserialize_with = "deserialize_date")]
    #[schema(value_type = String, example = "2025-01-31")]
    pub due_date: NaiveDate,
    /// Assignee; must belong to the caller's organization.
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubtaskDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub task: CreateTaskDto,
    pub parent_task_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateTaskDto {
    #[validate(length(min = 3, max = 50))]
    pub title: Option<String>,
    #[validate(length(min = 3, max = 500))]
    pub description: Option<String>,
    pub project_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    #[schema(value_type = Option<String>, example = "2025-01-31")]
    pub due_date: Option<NaiveDate>,
    pub user_id: Option<Uuid>,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepts exactly `YYYY-MM-DD`.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw).ok_or_else(|| {
        serde::de::Error::custom("Invalid date format. Use YYYY-MM-DD.")
    })
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_due_date(&raw).map(Some).ok_or_else(|| {
            serde::de::Error::custom("Invalid date format. Use YYYY-MM-DD.")
        }),
        None => Ok(None),
    }
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}
