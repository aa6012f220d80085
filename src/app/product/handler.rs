//! 产品处理器
//!
//! 把仓储返回的 [`Outcome`](crate::core::result::Outcome) 映射为 HTTP 响应。
//! 状态码只在这一层和 [`CoreError`] 中出现。

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{
        request::Parts,
        header::{ALLOW, IF_MODIFIED_SINCE, LAST_MODIFIED, LOCATION},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{
    cache::{self, ConditionalRead},
    model::Product,
    store::{ProductStore, MSG_NOT_FOUND},
};
use crate::core::{error::CoreError, response::ApiResponse};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS, HEAD";
pub const MSG_ID_MISMATCH: &str = "id mismatch between path and body";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
}

/// 请求级取消令牌
///
/// 客户端断开时处理器 future 被丢弃，守卫随之触发取消，正在进行的推送会被放弃。
fn request_cancellation() -> (CancellationToken, tokio_util::sync::DropGuard) {
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();
    (cancel, guard)
}

/// 路径中的产品 id
///
/// 无法解析为 UUID 的 id 不可能对应任何产品，按 404 处理。
pub struct ProductId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<Uuid>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(ProductId(id)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "无效的产品 id");
                Err(CoreError::NotFound(MSG_NOT_FOUND.to_string()))
            }
        }
    }
}

fn last_modified(product: &Product) -> [(axum::http::HeaderName, String); 1] {
    [(LAST_MODIFIED, cache::format_http_date(product.last_updated))]
}

pub async fn list_products(State(state): State<AppState>) -> Json<ApiResponse<Vec<Product>>> {
    Json(ApiResponse::success(state.store.get_all().await))
}

pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    headers: HeaderMap,
) -> Result<Response, CoreError> {
    let product = state.store.get_by_id(id).await.into_core()?;
    let since = headers
        .get(IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok());

    match cache::evaluate(product, since) {
        ConditionalRead::NotModified => Ok(StatusCode::NOT_MODIFIED.into_response()),
        ConditionalRead::Full(product) => Ok((
            last_modified(&product),
            Json(ApiResponse::success(product)),
        )
            .into_response()),
    }
}

/// 只返回 `Last-Modified`，不存在时返回 404
pub async fn head_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Response, CoreError> {
    let product = state.store.get_by_id(id).await.into_core()?;
    Ok((StatusCode::OK, last_modified(&product)).into_response())
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<Response, CoreError> {
    let (cancel, _guard) = request_cancellation();

    let created = state.store.create(product, &cancel).await.into_core()?;
    let location = format!("/api/products/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(ApiResponse::success(created)),
    )
        .into_response())
}

pub async fn replace_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    Json(product): Json<Product>,
) -> Result<StatusCode, CoreError> {
    if id != product.id {
        return Err(CoreError::BadRequest(MSG_ID_MISMATCH.to_string()));
    }

    let (cancel, _guard) = request_cancellation();
    state.store.update(product, &cancel).await.into_core()?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<StatusCode, CoreError> {
    state.store.delete(id).await.into_core()?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn product_options() -> impl IntoResponse {
    (StatusCode::OK, [(ALLOW, ALLOWED_METHODS)])
}

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "store": {
            "type": "in-memory",
            "products_count": state.store.len().await
        }
    }))
}
