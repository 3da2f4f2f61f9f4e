use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::middleware::guards::Guard;
use crate::state::AppState;

/// An ordered list of guards bound to the application state.
#[derive(Clone)]
pub struct Pipeline {
    state: AppState,
    guards: Arc<[Guard]>,
}

impl Pipeline {
    pub fn new(state: &AppState, guards: impl IntoIterator<Item = Guard>) -> Self {
        Self {
            state: state.clone(),
            guards: guards.into_iter().collect(),
        }
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }
}

/// Runs the guards strictly in order. The first rejection is the response;
/// otherwise the handler runs exactly once.
pub async fn enforce(State(pipeline): State<Pipeline>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    for guard in pipeline.guards.iter() {
        if let Err(err) = guard.check(&mut parts, &pipeline.state).await {
            let status = err.status.as_u16();
            taskhub_observability::track_guard_rejection(guard.name(), status);
            if err.status.is_server_error() {
                warn!(guard = guard.name(), status, "Guard failed");
            } else {
                debug!(guard = guard.name(), status, reason = %err.error, "Request rejected");
            }
            return err.into_response();
        }
    }

    next.run(Request::from_parts(parts, body)).await
}
