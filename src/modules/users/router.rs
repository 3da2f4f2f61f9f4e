use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use taskhub_auth::Role;

use crate::middleware::guards::Guard;
use crate::middleware::pipeline::{Pipeline, enforce};
use crate::state::AppState;

use super::controller::{create_user, delete_user, get_user, get_users, update_user};

const MEMBER: [Guard; 2] = [Guard::Authenticate, Guard::BindTenant];

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let member = || middleware::from_fn_with_state(Pipeline::new(state, MEMBER), enforce);

    Router::new()
        .route(
            "/",
            get(get_users).route_layer(member()).merge(post(create_user).route_layer(
                middleware::from_fn_with_state(
                    Pipeline::new(
                        state,
                        [
                            Guard::Authenticate,
                            Guard::RequireRoles(&[Role::Owner, Role::Manager]),
                            Guard::BindTenant,
                        ],
                    ),
                    enforce,
                ),
            )),
        )
        .route(
            "/{id}",
            get(get_user)
                .route_layer(member())
                .merge(patch(update_user).route_layer(middleware::from_fn_with_state(
                    Pipeline::new(
                        state,
                        [
                            Guard::Authenticate,
                            Guard::SameIdentity("id"),
                            Guard::BindTenant,
                        ],
                    ),
                    enforce,
                )))
                .merge(delete(delete_user).route_layer(middleware::from_fn_with_state(
                    Pipeline::new(
                        state,
                        [
                            Guard::Authenticate,
                            Guard::RequireRoles(&[Role::Owner]),
                            Guard::BindTenant,
                        ],
                    ),
                    enforce,
                ))),
        )
}
