/// Authentication and capability middleware
///
/// `auth_middleware` turns a bearer token into an `AuthenticatedUser`;
/// `require_capability` is layered per route group and is the only place
/// roles are consulted.
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use cadence_core::{Capability, Role, UserId};
use std::sync::Arc;

/// Authenticated caller stored in request extensions
/// Can be used as an extractor in handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }
}

/// Middleware that extracts and validates JWT from Authorization header
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let (user_id, role) = auth_service.verify_access_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id, role });

    Ok(next.run(request).await)
}

/// Middleware rejecting callers whose role lacks `capability`
///
/// Must run inside `auth_middleware`.
pub async fn require_capability(
    State(capability): State<Capability>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))?;

    if !user.can(capability) {
        tracing::debug!(
            user_id = %user.user_id,
            role = %user.role,
            ?capability,
            "capability check failed"
        );
        return Err(ServerError::Forbidden(format!(
            "role '{}' may not perform this operation",
            user.role
        )));
    }

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))
    }
}
