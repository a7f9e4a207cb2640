//! Gradescope REST API 服务
//!
//! 在 Gradescope 网页抓取客户端之上提供 REST 接口：
//! - 登录 / 登出（进程内单会话）
//! - 课程、作业、课程成员列表
//! - 健康检查

mod gradescope;
mod handlers;
mod routes;
mod service;
mod session;
mod state;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Json, Router,
};
use common::config::AppConfig;
use common::middleware::request_id::request_id_middleware;
use common::telemetry;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "gradescope-service";
/// Name reported by the health probe.
pub(crate) const SERVICE_DISPLAY_NAME: &str = "Gradescope API Server";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gradescope API Server",
        version = "0.1.0",
        description = "Gradescope 非官方 REST 接口"
    ),
    paths(
        handlers::login,
        handlers::logout,
        handlers::list_courses,
        handlers::list_assignments,
        handlers::list_course_users,
        handlers::health_check,
    ),
    components(schemas(
        common::models::LoginRequest,
        common::models::Course,
        common::models::CourseRole,
        common::models::Assignment,
        common::models::CourseUser,
        common::response::LoginResponse,
        common::response::MessageResponse,
        common::response::HealthResponse,
        common::response::ErrorBody,
    )),
    tags(
        (name = "auth", description = "登录端点"),
        (name = "courses", description = "课程数据端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（含 .env）
    let config = AppConfig::load_with_service(SERVICE_NAME).context("加载配置失败")?;

    // 初始化日志追踪
    telemetry::init_tracing(config.log_format);

    // 创建应用状态
    let state = AppState::new(config.clone());

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = config.bind_addr();
    info!(
        service = SERVICE_NAME,
        address = %addr,
        gradescope = %config.gradescope_base_url,
        "启动服务"
    );

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {addr}"))?;
    axum::serve(listener, app).await.context("服务启动失败")?;
    Ok(())
}

fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// 仅允许配置的来源携带凭据访问
///
/// 携带凭据时不能使用通配符，方法和请求头改为回显预检请求。
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "忽略无效的 CORS 来源");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
