//! Handler模块

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use validator::Validate;

use common::errors::AppError;
use common::models::{Assignment, Course, CourseUser, LoginRequest};
use common::response::{ErrorBody, HealthResponse, LoginResponse, MessageResponse};
use crate::service::{AuthService, CourseService};
use crate::session::ActiveSession;
use crate::state::AppState;

/// 登录 Gradescope
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功", body = LoginResponse),
        (status = 400, description = "请求体无效或邮箱、密码为空", body = ErrorBody),
        (status = 401, description = "登录失败", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;
    let service = AuthService::new(state.connector, state.sessions);
    Ok(Json(service.login(req).await?))
}

/// 登出 Gradescope
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "已登出", body = MessageResponse)
    )
)]
pub async fn logout(State(state): State<AppState>) -> Json<MessageResponse> {
    let service = AuthService::new(state.connector, state.sessions);
    Json(service.logout().await)
}

/// 列出当前账号的全部课程
#[utoipa::path(
    get,
    path = "/courses",
    tag = "courses",
    responses(
        (status = 200, description = "课程列表", body = Vec<Course>),
        (status = 401, description = "未登录", body = ErrorBody),
        (status = 500, description = "Gradescope 请求失败", body = ErrorBody)
    )
)]
pub async fn list_courses(
    ActiveSession(account): ActiveSession,
) -> Result<Json<Vec<Course>>, AppError> {
    let data = CourseService::new(account).list_courses().await?;
    Ok(Json(data))
}

/// 列出课程作业
#[utoipa::path(
    get,
    path = "/courses/{course_id}/assignments",
    tag = "courses",
    params(
        ("course_id" = String, Path, description = "课程 ID")
    ),
    responses(
        (status = 200, description = "作业列表", body = Vec<Assignment>),
        (status = 401, description = "未登录", body = ErrorBody),
        (status = 500, description = "Gradescope 请求失败", body = ErrorBody)
    )
)]
pub async fn list_assignments(
    ActiveSession(account): ActiveSession,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let data = CourseService::new(account)
        .list_assignments(&course_id)
        .await?;
    Ok(Json(data))
}

/// 列出课程成员
#[utoipa::path(
    get,
    path = "/courses/{course_id}/users",
    tag = "courses",
    params(
        ("course_id" = String, Path, description = "课程 ID")
    ),
    responses(
        (status = 200, description = "成员列表", body = Vec<CourseUser>),
        (status = 401, description = "未登录", body = ErrorBody),
        (status = 500, description = "Gradescope 请求失败", body = ErrorBody)
    )
)]
pub async fn list_course_users(
    ActiveSession(account): ActiveSession,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<CourseUser>>, AppError> {
    let data = CourseService::new(account)
        .list_course_users(&course_id)
        .await?;
    Ok(Json(data))
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        crate::SERVICE_DISPLAY_NAME,
        env!("CARGO_PKG_VERSION"),
    ))
}
