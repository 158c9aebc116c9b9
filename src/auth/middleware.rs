use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;
use tracing::debug;

use crate::{
    state::AppState,
    users::repo_types::{PublicUser, Store},
    utils::found,
};

/// The user resolved from the session for the lifetime of one request.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<PublicUser>);

/// Reads what [`resolve_current_user`] attached; anonymous if it never ran.
#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Stage one, on every route: load the session's user from the primary.
/// A stale session (user gone) proceeds anonymously.
pub async fn resolve_current_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let mut current = CurrentUser::default();

    if let Some(user_id) = state.sessions.read(&jar) {
        match state.users.get_user_by_id(Store::Primary, user_id).await {
            Ok(user) => current = CurrentUser(Some(user.into())),
            Err(e) => debug!(error = %e, user_id, "session user not loaded"),
        }
    }

    req.extensions_mut().insert(current);
    next.run(req).await
}

/// Stage two, on protected routes only: no valid session means `302 /login`.
pub async fn require_session(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    if state.sessions.read(&jar).is_none() {
        debug!(uri = %req.uri(), "no session, redirecting to login");
        return found("/login").into_response();
    }
    next.run(req).await
}
