//! 操作结果模块
//!
//! 仓储层不抛出错误，而是返回 [`Outcome`]：成功时携带值，失败时携带
//! 可读的错误信息和粗粒度的分类。分类到 HTTP 状态码的映射只在边界层完成。

use std::fmt;

/// 失败分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureKind {
    /// 请求本身有问题（包括重复 ID、路径与请求体 ID 不一致）
    #[default]
    BadRequest,
    /// 实体不存在
    NotFound,
    /// 外部系统拒绝了同步或同步被取消
    Upstream,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::BadRequest => write!(f, "BAD_REQUEST"),
            FailureKind::NotFound => write!(f, "NOT_FOUND"),
            FailureKind::Upstream => write!(f, "UPSTREAM_ERROR"),
        }
    }
}

/// 结果分类：成功或某一类失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Ok,
    Failed(FailureKind),
}

/// 成功/失败二选一的结果类型
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure { message: String, kind: FailureKind },
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// 使用默认分类 (BadRequest) 构造失败结果
    pub fn failure(message: impl Into<String>) -> Self {
        Self::failure_with(message, FailureKind::default())
    }

    pub fn failure_with(message: impl Into<String>, kind: FailureKind) -> Self {
        Outcome::Failure {
            message: message.into(),
            kind,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure_with(message, FailureKind::NotFound)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::failure_with(message, FailureKind::Upstream)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// 失败时返回 `None`
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    /// 成功时返回 `None`
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { message, .. } => Some(message),
        }
    }

    pub fn classification(&self) -> Classification {
        match self {
            Outcome::Success(_) => Classification::Ok,
            Outcome::Failure { kind, .. } => Classification::Failed(*kind),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure { message, kind } => Outcome::Failure { message, kind },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_exposes_value() {
        let outcome = Outcome::success(42);
        assert!(outcome.is_success());
        assert_eq!(outcome.value(), Some(&42));
        assert_eq!(outcome.error(), None);
        assert_eq!(outcome.classification(), Classification::Ok);
    }

    #[test]
    fn test_failure_defaults_to_bad_request() {
        let outcome: Outcome<u32> = Outcome::failure("duplicate id");
        assert!(!outcome.is_success());
        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.error(), Some("duplicate id"));
        assert_eq!(
            outcome.classification(),
            Classification::Failed(FailureKind::BadRequest)
        );
    }

    #[test]
    fn test_failure_value_is_absent_not_panic() {
        let outcome: Outcome<String> = Outcome::not_found("not found");
        assert!(outcome.clone().into_value().is_none());
        assert_eq!(
            outcome.classification(),
            Classification::Failed(FailureKind::NotFound)
        );
    }

    #[test]
    fn test_map_keeps_failure_arm() {
        let outcome: Outcome<u32> = Outcome::upstream("upstream sync failed");
        let mapped = outcome.map(|v| v * 2);
        assert_eq!(
            mapped,
            Outcome::Failure {
                message: "upstream sync failed".to_string(),
                kind: FailureKind::Upstream,
            }
        );

        assert_eq!(Outcome::success(2).map(|v| v * 2), Outcome::Success(4));
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::BadRequest.to_string(), "BAD_REQUEST");
        assert_eq!(FailureKind::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(FailureKind::Upstream.to_string(), "UPSTREAM_ERROR");
    }
}
