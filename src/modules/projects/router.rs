use axum::{Router, middleware, routing::get};
use taskhub_auth::Role;

use crate::middleware::guards::Guard;
use crate::middleware::pipeline::{Pipeline, enforce};
use crate::state::AppState;

use super::controller::{create_project, delete_project, get_project, get_projects, update_project};

pub fn init_projects_router(state: &AppState) -> Router<AppState> {
    let pipeline = Pipeline::new(
        state,
        [
            Guard::Authenticate,
            Guard::RequireRoles(&[Role::Owner, Role::Manager]),
            Guard::BindTenant,
        ],
    );

    Router::new()
        .route("/", get(get_projects).post(create_project))
        .route(
            "/{id}",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .route_layer(middleware::from_fn_with_state(pipeline, enforce))
}
