//! 应用层

pub mod product;

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::core::middleware::request_logging_middleware;
use product::handler::{self, AppState};

/// 构建完整的路由
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handler::list_products)
                .post(handler::create_product)
                .options(handler::product_options),
        )
        .route(
            "/api/products/:id",
            get(handler::get_product)
                .head(handler::head_product)
                .put(handler::replace_product)
                .delete(handler::delete_product),
        )
        .route("/health", get(handler::health_check))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
