use std::sync::{Arc, Mutex};

use axum::{extract::FromRequestParts, http::request::Parts};
use taskhub_core::AppError;
use taskhub_db::TenantScope;

/// Carries the tenant-bound transaction from the pipeline to the handler.
///
/// Request extensions must be `Clone`, a transaction is not, so the scope sits
/// behind a shared slot the handler takes it out of. If nobody takes it, it is
/// dropped (and rolled back) with the request.
#[derive(Clone)]
pub struct TenantSlot(Arc<Mutex<Option<TenantScope>>>);

impl TenantSlot {
    pub fn new(scope: TenantScope) -> Self {
        Self(Arc::new(Mutex::new(Some(scope))))
    }

    fn take(&self) -> Option<TenantScope> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Handler argument for tenant-scoped routes.
///
/// Only available behind [`Guard::BindTenant`](crate::middleware::guards::Guard::BindTenant).
/// Writes must call [`TenantScope::commit`].
pub struct Tenant(pub TenantScope);

impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantSlot>()
            .and_then(TenantSlot::take)
            .map(Tenant)
            .ok_or_else(|| AppError::internal_error("Tenant context not bound".to_string()))
    }
}
