//! Gradescope 协作方接口
//!
//! 服务只通过这里的 trait 访问 Gradescope，便于在测试中替换实现。

use std::sync::Arc;

use async_trait::async_trait;
use common::models::RawRecord;
use gradescope_client::{Account, ClientError, Connection, CourseGroups};

/// 已登录的 Gradescope 会话
#[async_trait]
pub trait GradescopeAccount: Send + Sync {
    /// 按身份分组列出课程
    async fn get_courses(&self) -> Result<CourseGroups, ClientError>;

    /// 列出课程作业
    async fn get_assignments(&self, course_id: &str) -> Result<Vec<RawRecord>, ClientError>;

    /// 列出课程成员
    async fn get_course_users(&self, course_id: &str) -> Result<Vec<RawRecord>, ClientError>;
}

/// 创建并认证新会话
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Arc<dyn GradescopeAccount>, ClientError>;
}

/// 基于网页抓取客户端的连接器
pub struct GradescopeConnector {
    base_url: String,
}

impl GradescopeConnector {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Connector for GradescopeConnector {
    async fn connect(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Arc<dyn GradescopeAccount>, ClientError> {
        let account = Connection::new(self.base_url.as_str())?
            .login(email, password)
            .await?;
        Ok(Arc::new(account))
    }
}

#[async_trait]
impl GradescopeAccount for Account {
    async fn get_courses(&self) -> Result<CourseGroups, ClientError> {
        Account::get_courses(self).await
    }

    async fn get_assignments(&self, course_id: &str) -> Result<Vec<RawRecord>, ClientError> {
        Account::get_assignments(self, course_id).await
    }

    async fn get_course_users(&self, course_id: &str) -> Result<Vec<RawRecord>, ClientError> {
        Account::get_course_users(self, course_id).await
    }
}
