//! 外部系统同步层 (ACL)
//!
//! 内存仓储与外部记录系统之间唯一的接缝。失败在这里被折叠为
//! 空列表或 `false`，不会以错误的形式向上传播。

pub mod json_placeholder;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::app::product::model::Product;

pub use json_placeholder::JsonPlaceholderSynchronizer;

/// 产品同步器
#[async_trait]
pub trait ProductSynchronizer: Send + Sync {
    /// 获取初始数据；任何失败都返回空列表
    async fn fetch_initial(&self, cancel: &CancellationToken) -> Vec<Product>;

    /// 推送一次创建或更新；只有外部系统明确成功时才返回 `true`
    async fn push_update(&self, product: &Product, cancel: &CancellationToken) -> bool;
}

/// 同步过程中的内部错误，只用于日志
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("请求已取消")]
    Cancelled,

    #[error("网络错误: {0}")]
    Network(#[from] reqwest::Error),

    #[error("外部服务返回 HTTP {0}")]
    Status(u16),

    #[error("无效的地址: {0}")]
    InvalidUrl(String),
}
