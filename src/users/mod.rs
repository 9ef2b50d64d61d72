use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod memory;
mod password;
pub mod repo;
pub mod repo_types;
mod services;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
