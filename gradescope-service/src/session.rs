//! 会话存储
//!
//! 进程内只保存一个 Gradescope 会话，所有调用方共享。

use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use common::errors::AppError;
use tokio::sync::RwLock;

use crate::gradescope::GradescopeAccount;
use crate::state::AppState;

/// 会话存储 Trait
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 当前会话（未登录时为 None）
    async fn current(&self) -> Option<Arc<dyn GradescopeAccount>>;

    /// 替换当前会话
    async fn replace(&self, account: Arc<dyn GradescopeAccount>);

    /// 清除会话，返回之前是否已登录
    async fn clear(&self) -> bool;
}

/// 单会话内存存储
#[derive(Default)]
pub struct InMemorySessionStore {
    slot: RwLock<Option<Arc<dyn GradescopeAccount>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn current(&self) -> Option<Arc<dyn GradescopeAccount>> {
        self.slot.read().await.clone()
    }

    async fn replace(&self, account: Arc<dyn GradescopeAccount>) {
        *self.slot.write().await = Some(account);
    }

    async fn clear(&self) -> bool {
        self.slot.write().await.take().is_some()
    }
}

/// 当前请求使用的已登录会话
///
/// 未登录时在调用 Gradescope 之前直接返回 401。
pub struct ActiveSession(pub Arc<dyn GradescopeAccount>);

impl FromRequestParts<AppState> for ActiveSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .sessions
            .current()
            .await
            .map(ActiveSession)
            .ok_or(AppError::NotLoggedIn)
    }
}
