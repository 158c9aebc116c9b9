use axum::{
    extract::{Path, Query, State},
    middleware::from_fn_with_state,
    response::{Html, Response},
    routing::get,
    Router,
};
use tracing::instrument;

use crate::{
    auth::middleware::{require_session, CurrentUser},
    errors::{AppError, AppResult},
    state::AppState,
    templates::{render, UserPageTemplate, UsersListTemplate},
    users::{
        dto::{lenient_int, parse_paging, PageParams, Paging, SearchParams},
        repo_types::{PublicUser, Store, User},
    },
    utils::found,
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/users", get(users_list))
        .route("/users/search", get(users_search))
}

pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(user_page))
        .route_layer(from_fn_with_state(state, require_session))
}

pub async fn home() -> Response {
    found("/users")
}

#[instrument(skip(state, current_user))]
pub async fn user_page(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    // Non-numeric ids become 0, which never exists.
    let id = lenient_int(Some(id.as_str()));
    let user = state.users.get_user_by_id(Store::Primary, id).await?;
    render(&UserPageTemplate {
        user: user.into(),
        current_user,
    })
}

#[instrument(skip(state, current_user))]
pub async fn users_list(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Query(params): Query<PageParams>,
) -> AppResult<Html<String>> {
    let paging = parse_paging(&params);
    let users = state.users.list_users(paging.as_page()).await?;
    render(&list_template(users, current_user, paging, None))
}

#[instrument(skip(state, current_user))]
pub async fn users_search(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Query(params): Query<PageParams>,
    Query(search): Query<SearchParams>,
) -> AppResult<Html<String>> {
    let name_substr = search
        .name_substr
        .ok_or_else(|| AppError::Validation("name_substr is required".into()))?;
    let paging = parse_paging(&params);
    let users = state
        .users
        .search_users_by_name(&name_substr, paging.as_page())
        .await?;
    render(&list_template(users, current_user, paging, Some(name_substr)))
}

fn list_template(
    users: Vec<User>,
    current_user: Option<PublicUser>,
    paging: Paging,
    name_substr: Option<String>,
) -> UsersListTemplate {
    UsersListTemplate {
        has_next: users.len() as i64 == paging.count,
        users: users.into_iter().map(PublicUser::from).collect(),
        current_user,
        page: paging.page,
        count: paging.count,
        name_substr,
    }
}
