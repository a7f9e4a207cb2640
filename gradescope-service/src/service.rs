//! Gradescope 业务服务模块
//!
//! 负责登录状态切换，以及把抓取到的原始记录整理成固定的响应结构。

use std::sync::Arc;

use common::errors::{AppError, AppResult};
use common::models::{Assignment, Course, CourseRole, CourseUser, LoginRequest};
use common::response::{LoginResponse, MessageResponse};
use gradescope_client::{ClientError, CourseGroups, ErrorKind};
use tracing::{info, warn};

use crate::gradescope::{Connector, GradescopeAccount};
use crate::session::SessionStore;

/// 登录 / 登出服务
pub struct AuthService {
    connector: Arc<dyn Connector>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(connector: Arc<dyn Connector>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            connector,
            sessions,
        }
    }

    /// 建立新的 Gradescope 会话
    ///
    /// 旧会话在尝试开始时即被丢弃，登录失败后处于未登录状态。
    pub async fn login(&self, req: LoginRequest) -> AppResult<LoginResponse> {
        self.sessions.clear().await;

        let account = self
            .connector
            .connect(&req.email, &req.password)
            .await
            .map_err(|e| {
                warn!(email = %req.email, error = %e, "登录失败");
                AppError::LoginFailed(e.to_string())
            })?;

        self.sessions.replace(account).await;
        info!(email = %req.email, "登录成功");

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            email: req.email,
        })
    }

    /// 清除会话，未登录时同样成功
    pub async fn logout(&self) -> MessageResponse {
        let had_session = self.sessions.clear().await;
        info!(had_session, "已登出");
        MessageResponse::new("Logout successful")
    }
}

/// 课程数据服务，作用于单个已登录会话
pub struct CourseService {
    account: Arc<dyn GradescopeAccount>,
}

impl CourseService {
    pub fn new(account: Arc<dyn GradescopeAccount>) -> Self {
        Self { account }
    }

    /// 列出全部课程，教师课程在前
    pub async fn list_courses(&self) -> AppResult<Vec<Course>> {
        let groups = self
            .account
            .get_courses()
            .await
            .map_err(upstream("courses"))?;
        Ok(flatten_courses(&groups))
    }

    pub async fn list_assignments(&self, course_id: &str) -> AppResult<Vec<Assignment>> {
        let raw = self
            .account
            .get_assignments(course_id)
            .await
            .map_err(upstream("assignments"))?;
        Ok(raw.iter().map(Assignment::from_raw).collect())
    }

    pub async fn list_course_users(&self, course_id: &str) -> AppResult<Vec<CourseUser>> {
        let raw = self
            .account
            .get_course_users(course_id)
            .await
            .map_err(upstream("course users"))?;
        Ok(raw.iter().map(CourseUser::from_raw).collect())
    }
}

/// 合并两组课程并按来源标记身份
pub fn flatten_courses(groups: &CourseGroups) -> Vec<Course> {
    let instructor = groups
        .instructor
        .iter()
        .flatten()
        .map(|raw| Course::from_raw(raw, CourseRole::Instructor));
    let student = groups
        .student
        .iter()
        .flatten()
        .map(|raw| Course::from_raw(raw, CourseRole::Student));
    instructor.chain(student).collect()
}

fn upstream(context: &'static str) -> impl Fn(ClientError) -> AppError {
    move |err| {
        let code = match err.kind() {
            ErrorKind::Auth => "UPSTREAM_AUTH",
            ErrorKind::NotFound => "UPSTREAM_NOT_FOUND",
            ErrorKind::Network => "UPSTREAM_NETWORK",
            ErrorKind::Parse => "UPSTREAM_PARSE",
        };
        AppError::Upstream {
            context,
            code,
            message: err.to_string(),
        }
    }
}
