use askama::Template;
use axum::response::Html;

use crate::errors::AppResult;
use crate::users::repo_types::PublicUser;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<PublicUser>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub current_user: Option<PublicUser>,
}

#[derive(Template)]
#[template(path = "user_page.html")]
pub struct UserPageTemplate {
    pub user: PublicUser,
    pub current_user: Option<PublicUser>,
}

#[derive(Template)]
#[template(path = "users_list.html")]
pub struct UsersListTemplate {
    pub users: Vec<PublicUser>,
    pub current_user: Option<PublicUser>,
    pub page: i64,
    pub count: i64,
    pub has_next: bool,
    /// Set when the list is a search result.
    pub name_substr: Option<String>,
}

pub fn render<T: Template>(tpl: &T) -> AppResult<Html<String>> {
    Ok(Html(tpl.render()?))
}
