//! JSONPlaceholder 同步器
//!
//! 把外部的 todo 资源映射为产品：`title` → `name`，`completed` → `is_active`，
//! 每条记录都分配新的 UUID 和当前时间。

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{ProductSynchronizer, SyncError};
use crate::app::product::model::Product;
use crate::config::UpstreamConfig;

/// 外部 API 返回的 todo 记录
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalTodo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl From<ExternalTodo> for Product {
    fn from(todo: ExternalTodo) -> Self {
        Product {
            id: Uuid::new_v4(),
            name: todo.title,
            is_active: todo.completed,
            last_updated: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonPlaceholderSynchronizer {
    client: Client,
    base_url: Url,
    seed_limit: usize,
}

impl JsonPlaceholderSynchronizer {
    pub fn new(config: &UpstreamConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Self::with_client(client, &config.base_url, config.seed_limit)
    }

    /// 使用自定义的 reqwest Client 创建同步器
    pub fn with_client(client: Client, base_url: &str, seed_limit: usize) -> Result<Self, SyncError> {
        // 保证以 '/' 结尾，否则 join 会替换最后一段路径
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| SyncError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            seed_limit,
        })
    }

    fn todos_url(&self) -> Result<Url, SyncError> {
        self.base_url
            .join("todos")
            .map_err(|e| SyncError::InvalidUrl(e.to_string()))
    }

    async fn try_fetch_initial(&self) -> Result<Vec<Product>, SyncError> {
        let mut url = self.todos_url()?;
        url.query_pairs_mut()
            .append_pair("_limit", &self.seed_limit.to_string());

        debug!(url = %url, "获取初始产品");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SyncError::Status(response.status().as_u16()));
        }

        let todos: Vec<ExternalTodo> = response.json().await?;
        Ok(todos.into_iter().map(Product::from).collect())
    }

    async fn try_push_update(&self, product: &Product) -> Result<(), SyncError> {
        let url = self.todos_url()?;

        debug!(url = %url, product_id = %product.id, "推送产品到外部系统");

        let response = self.client.post(url).json(product).send().await?;
        if !response.status().is_success() {
            return Err(SyncError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

/// 在取消令牌触发时放弃请求
async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, SyncError>>,
) -> Result<T, SyncError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SyncError::Cancelled),
        result = fut => result,
    }
}

#[async_trait]
impl ProductSynchronizer for JsonPlaceholderSynchronizer {
    async fn fetch_initial(&self, cancel: &CancellationToken) -> Vec<Product> {
        match cancellable(cancel, self.try_fetch_initial()).await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "获取初始产品失败，使用空集合");
                Vec::new()
            }
        }
    }

    async fn push_update(&self, product: &Product, cancel: &CancellationToken) -> bool {
        match cancellable(cancel, self.try_push_update(product)).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, product_id = %product.id, "推送产品失败");
                false
            }
        }
    }
}
