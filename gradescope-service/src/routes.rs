//! 路由模块

use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/courses", get(handlers::list_courses))
        .route("/courses/{course_id}/assignments", get(handlers::list_assignments))
        .route("/courses/{course_id}/users", get(handlers::list_course_users))
        .route("/health", get(handlers::health_check))
}
