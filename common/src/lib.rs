//! Gradescope API 服务公共模块
//!
//! 提供服务共享的基础设施：
//! - 配置加载
//! - 统一错误类型
//! - 中间件
//! - 数据模型与响应结构

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod telemetry;
