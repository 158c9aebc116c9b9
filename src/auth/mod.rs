use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod session;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
