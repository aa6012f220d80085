//! 集成测试公共工具

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use products_api::app::{
    self,
    product::{handler::AppState, model::Product, store::ProductStore},
};
use products_api::infrastructure::acl::ProductSynchronizer;

/// 可控的同步器：记录推送次数，按开关决定是否接受
pub struct StubSynchronizer {
    pub seed: Vec<Product>,
    pub accept: AtomicBool,
    pub pushes: AtomicUsize,
}

impl StubSynchronizer {
    pub fn accepting() -> Self {
        Self {
            seed: Vec::new(),
            accept: AtomicBool::new(true),
            pushes: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        let stub = Self::accepting();
        stub.accept.store(false, Ordering::SeqCst);
        stub
    }

    pub fn set_accept(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    pub fn pushes(&self) -> usize {
        self.pushes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSynchronizer for StubSynchronizer {
    async fn fetch_initial(&self, _cancel: &CancellationToken) -> Vec<Product> {
        self.seed.clone()
    }

    async fn push_update(&self, _product: &Product, _cancel: &CancellationToken) -> bool {
        self.pushes.fetch_add(1, Ordering::SeqCst);
        self.accept.load(Ordering::SeqCst)
    }
}

/// 创建测试路由
pub async fn create_test_app(acl: Arc<StubSynchronizer>) -> (Router, Arc<ProductStore>) {
    let store = Arc::new(ProductStore::initialize(acl, &CancellationToken::new()).await);
    let state = AppState {
        store: Arc::clone(&store),
    };
    (app::router(state, Duration::from_secs(5)), store)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
