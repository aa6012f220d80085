//! 产品内存仓储
//!
//! 写入采用 write-through 策略：创建和更新必须先得到外部系统的确认，
//! 然后才修改内存中的集合。外部拒绝或取消时集合保持原样。
//!
//! 所有写操作通过 `write_gate` 串行执行；集合本身放在读写锁中，
//! 读操作在慢速推送期间仍然可以并发进行，并且总是看到完整的快照。

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::model::Product;
use crate::core::result::Outcome;
use crate::infrastructure::acl::ProductSynchronizer;

pub const MSG_NOT_FOUND: &str = "not found";
pub const MSG_DUPLICATE_ID: &str = "duplicate id";
pub const MSG_UPSTREAM_FAILED: &str = "upstream sync failed";

pub struct ProductStore {
    products: RwLock<Vec<Product>>,
    write_gate: Mutex<()>,
    acl: Arc<dyn ProductSynchronizer>,
}

impl ProductStore {
    /// 创建仓储并完成一次初始数据加载
    ///
    /// 加载失败时同步器返回空列表，仓储以空集合启动。
    pub async fn initialize(acl: Arc<dyn ProductSynchronizer>, cancel: &CancellationToken) -> Self {
        let mut products: Vec<Product> = Vec::new();
        for product in acl.fetch_initial(cancel).await {
            if products.iter().any(|p| p.id == product.id) {
                warn!(product_id = %product.id, "初始数据中存在重复 ID，已忽略");
                continue;
            }
            products.push(product);
        }

        info!(count = products.len(), "产品仓储初始化完成");

        Self {
            products: RwLock::new(products),
            write_gate: Mutex::new(()),
            acl,
        }
    }

    /// 按插入顺序返回当前快照
    pub async fn get_all(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Outcome<Product> {
        match self.products.read().await.iter().find(|p| p.id == id) {
            Some(product) => Outcome::success(product.clone()),
            None => Outcome::not_found(MSG_NOT_FOUND),
        }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    pub async fn add(&self, product: Product, cancel: &CancellationToken) -> Outcome<bool> {
        self.create(product, cancel).await.map(|_| true)
    }

    /// 与 [`add`](Self::add) 相同，成功时返回已写入的产品
    pub async fn create(&self, mut product: Product, cancel: &CancellationToken) -> Outcome<Product> {
        let _gate = self.write_gate.lock().await;

        if self.position(product.id).await.is_some() {
            debug!(product_id = %product.id, "产品 ID 已存在");
            return Outcome::failure(MSG_DUPLICATE_ID);
        }

        product.last_updated = Utc::now();

        if !self.push(&product, cancel).await {
            warn!(product_id = %product.id, "外部系统未确认创建");
            return Outcome::upstream(MSG_UPSTREAM_FAILED);
        }

        self.products.write().await.push(product.clone());
        debug!(product_id = %product.id, "产品已创建");
        Outcome::success(product)
    }

    pub async fn update(&self, mut product: Product, cancel: &CancellationToken) -> Outcome<Product> {
        let _gate = self.write_gate.lock().await;

        let Some((index, previous)) = self.position(product.id).await else {
            return Outcome::not_found(MSG_NOT_FOUND);
        };

        // 时间戳不能倒退
        product.last_updated = Utc::now().max(previous);

        if !self.push(&product, cancel).await {
            warn!(product_id = %product.id, "外部系统未确认更新");
            return Outcome::upstream(MSG_UPSTREAM_FAILED);
        }

        // 持有 write_gate，索引在推送期间不会变化
        self.products.write().await[index] = product.clone();
        debug!(product_id = %product.id, "产品已更新");
        Outcome::success(product)
    }

    /// 只删除本地数据，不通知外部系统
    pub async fn delete(&self, id: Uuid) -> Outcome<bool> {
        let _gate = self.write_gate.lock().await;

        let mut products = self.products.write().await;
        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                debug!(product_id = %id, "产品已删除");
                Outcome::success(true)
            }
            None => Outcome::not_found(MSG_NOT_FOUND),
        }
    }

    async fn position(&self, id: Uuid) -> Option<(usize, chrono::DateTime<Utc>)> {
        self.products
            .read()
            .await
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == id)
            .map(|(index, p)| (index, p.last_updated))
    }

    /// 取消等同于推送失败
    async fn push(&self, product: &Product, cancel: &CancellationToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(product_id = %product.id, "推送已取消");
                false
            }
            accepted = self.acl.push_update(product, cancel) => accepted,
        }
    }
}
