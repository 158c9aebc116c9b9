use axum::{
    extract::State,
    response::{Html, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, SignupForm},
        middleware::CurrentUser,
        password::{hash_password_blocking, verify_password_blocking},
    },
    errors::{AppError, AppResult},
    state::AppState,
    templates::{render, LoginTemplate, SignupTemplate},
    users::repo_types::NewUser,
    utils::{found, is_valid_email},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/signup", get(signup_form).post(signup))
}

pub async fn login_form(CurrentUser(current_user): CurrentUser) -> AppResult<Html<String>> {
    render(&LoginTemplate { current_user })
}

#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, Response)> {
    let email = form.email.trim().to_lowercase();

    let user = match state.users.get_user_by_email(&email).await {
        Ok(u) => u,
        Err(AppError::NotFound) => {
            warn!(email = %email, "login unknown email");
            return Err(AppError::Unauthorized);
        }
        Err(e) => return Err(e),
    };

    if !verify_password_blocking(form.password, user.password_hash.clone()).await {
        warn!(email = %email, user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized);
    }

    let jar = state.sessions.create(jar, user.id)?;
    info!(user_id = user.id, "user logged in");
    Ok((jar, found(&format!("/users/{}", user.id))))
}

#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    (state.sessions.clear(jar), found("/login"))
}

pub async fn signup_form(CurrentUser(current_user): CurrentUser) -> AppResult<Html<String>> {
    render(&SignupTemplate { current_user })
}

#[instrument(skip(state, jar, form))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> AppResult<(CookieJar, Response)> {
    let email = form.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if form.password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }

    let password_hash = hash_password_blocking(form.password).await?;
    let new_user = NewUser {
        name: form.name,
        surname: form.surname,
        birthday: form.birthday,
        city: form.city,
        about: form.about,
        email,
        password_hash,
    };

    let id = match state.users.create_user(&new_user).await {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, email = %new_user.email, "create user failed");
            return Err(e);
        }
    };

    let jar = state.sessions.create(jar, id)?;
    info!(user_id = id, email = %new_user.email, "user signed up");
    Ok((jar, found(&format!("/users/{id}"))))
}
