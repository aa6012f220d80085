//! # 产品服务
//!
//! 基于 Axum 的产品 CRUD 服务：
//! - 内存仓储，每次写入先同步到外部记录系统 (ACL)
//! - 显式的成功/失败结果类型代替错误传播
//! - 基于 `If-Modified-Since` 的条件读取

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
