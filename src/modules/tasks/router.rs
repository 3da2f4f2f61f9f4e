use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::guards::Guard;
use crate::middleware::pipeline::{Pipeline, enforce};
use crate::state::AppState;

use super::controller::{
    create_subtask, create_task, delete_task, get_task, get_tasks, get_tasks_by_project,
    update_task,
};

/// Any member of the organization may work with its tasks.
pub fn init_tasks_router(state: &AppState) -> Router<AppState> {
    let pipeline = Pipeline::new(state, [Guard::Authenticate, Guard::BindTenant]);

    Router::new()
        .route("/", get(get_tasks).post(create_task))
        .route("/subtask", post(create_subtask))
        .route("/project/{project_id}", get(get_tasks_by_project))
        .route(
            "/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route_layer(middleware::from_fn_with_state(pipeline, enforce))
}
