//! Authentication middleware

use crate::core::error::{BoardError, Result};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Uniform rejection for every authentication failure. A missing header, a
/// bad token, and an unresolvable or deactivated subject must produce the
/// same externally observable outcome.
fn authentication_required() -> BoardError {
    BoardError::AuthenticationError("Could not validate credentials".to_string())
}

/// Acting identity resolved by the middleware, stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// Authentication middleware for protected routes
///
/// Extracts the bearer token, verifies it, and resolves the subject against
/// the credential store before the request reaches a handler. The only side
/// effect is that single store lookup.
pub async fn authenticate(
    State(state): State<crate::api::handlers::AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    use axum::http::header;

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match token {
        Some(t) => t,
        None => {
            tracing::debug!("Missing authorization header");
            return authentication_required().into_response();
        }
    };

    let username = match state.tokens.verify(token) {
        Ok(sub) => sub,
        Err(e) => return e.into_response(),
    };

    let user = match state.user_repo.find_by_username(&username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            tracing::debug!(username = %username, "Token subject no longer exists");
            return authentication_required().into_response();
        }
        Err(e) => return e.into_response(),
    };

    if !user.is_active {
        tracing::debug!(username = %username, "Deactivated user rejected");
        return authentication_required().into_response();
    }

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
    });

    next.run(request).await
}

// Implement FromRequestParts for AuthUser to enable extraction in handlers
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BoardError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(authentication_required)
    }
}
