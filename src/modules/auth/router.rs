use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{sign_in, sign_up};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
}
