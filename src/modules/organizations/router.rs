use axum::{
    Router, middleware,
    routing::{get, patch},
};
use taskhub_auth::Role;

use crate::middleware::guards::Guard;
use crate::middleware::pipeline::{Pipeline, enforce};
use crate::state::AppState;

use super::controller::{
    delete_current_organization, get_current_organization, update_current_organization,
};

pub fn init_organizations_router(state: &AppState) -> Router<AppState> {
    let member = Pipeline::new(state, [Guard::Authenticate, Guard::BindTenant]);
    let owner = Pipeline::new(
        state,
        [
            Guard::Authenticate,
            Guard::RequireRoles(&[Role::Owner]),
            Guard::BindTenant,
        ],
    );

    Router::new().route(
        "/current",
        get(get_current_organization)
            .route_layer(middleware::from_fn_with_state(member, enforce))
            .merge(
                patch(update_current_organization)
                    .delete(delete_current_organization)
                    .route_layer(middleware::from_fn_with_state(owner, enforce)),
            ),
    )
}
