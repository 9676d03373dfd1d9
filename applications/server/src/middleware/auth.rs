/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use melody_core::{Caller, UserId};
use std::sync::Arc;

/// Caller identity resolved for the current request
///
/// Requests without an `Authorization` header are anonymous. Handlers pass
/// the inner `Caller` straight to the storage layer, which decides what an
/// anonymous caller may do.
#[derive(Debug, Clone, Copy)]
pub struct CurrentCaller(pub Caller);

/// Extractor for handlers that always need a signed-in user
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        self.0
    }

    pub fn caller(&self) -> Caller {
        Caller::User(self.0)
    }
}

/// Middleware that resolves the caller from an optional bearer token
///
/// A missing header yields `Caller::Anonymous`; a present but malformed or
/// invalid token is rejected with 401.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let caller = match request.headers().get(AUTHORIZATION) {
        None => Caller::Anonymous,
        Some(value) => {
            let token = value
                .to_str()
                .ok()
                .and_then(|h| h.strip_prefix("Bearer "))
                .ok_or_else(|| ServerError::Auth("Malformed Authorization header".to_string()))?;

            let user_id = auth_service.verify_access_token(token).map_err(|e| {
                tracing::warn!("Token verification failed: {}", e);
                ServerError::Auth("Invalid or expired token".to_string())
            })?;

            Caller::User(user_id)
        }
    };

    request.extensions_mut().insert(CurrentCaller(caller));

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentCaller
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentCaller>()
            .copied()
            .unwrap_or(CurrentCaller(Caller::Anonymous)))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentCaller(caller) = CurrentCaller::from_request_parts(parts, state).await?;
        let user_id = caller.require_user().map_err(ServerError::from)?;
        Ok(AuthenticatedUser(user_id))
    }
}
