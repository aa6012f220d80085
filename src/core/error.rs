//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use super::result::{FailureKind, Outcome};

/// 核心错误类型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("请求错误: {0}")]
    BadRequest(String),
    #[error("资源不存在: {0}")]
    NotFound(String),
    #[error("内部错误: {0}")]
    InternalServerError(String),
}

impl CoreError {
    /// 把失败的 [`Outcome`] 转换为边界层错误
    ///
    /// NotFound 映射为 404，其余失败一律映射为 400。
    pub fn from_failure(message: impl Into<String>, kind: FailureKind) -> Self {
        match kind {
            FailureKind::NotFound => CoreError::NotFound(message.into()),
            FailureKind::BadRequest | FailureKind::Upstream => {
                CoreError::BadRequest(message.into())
            }
        }
    }
}

impl<T> Outcome<T> {
    /// 成功时取出值，失败时转换为 [`CoreError`]
    pub fn into_core(self) -> Result<T, CoreError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure { message, kind } => Err(CoreError::from_failure(message, kind)),
        }
    }
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message, user_message) = match self {
            CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            CoreError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                msg,
            ),
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = CoreError::from_failure("not found", FailureKind::NotFound);
        assert_eq!(err, CoreError::NotFound("not found".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_failures_map_to_400() {
        for kind in [FailureKind::BadRequest, FailureKind::Upstream] {
            let err = CoreError::from_failure("boom", kind);
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_into_core() {
        assert_eq!(Outcome::success(1).into_core(), Ok(1));
        assert_eq!(
            Outcome::<u8>::upstream("upstream sync failed").into_core(),
            Err(CoreError::BadRequest("upstream sync failed".to_string()))
        );
    }
}
