//! 条件读取 (If-Modified-Since) 策略
//!
//! 纯函数：只依赖存储的时间戳和客户端提供的时间，不持有任何状态。

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

use super::model::Product;

/// 条件读取的结果
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionalRead<T> {
    /// 返回完整资源
    Full(T),
    /// 客户端缓存仍然有效
    NotModified,
}

/// 根据 `If-Modified-Since` 判断是否需要返回完整资源
///
/// 无法解析的时间按未提供处理。存储的时间戳先截断到秒再比较，
/// 客户端时间大于等于截断值时视为未修改。
pub fn evaluate(product: Product, if_modified_since: Option<&str>) -> ConditionalRead<Product> {
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return ConditionalRead::Full(product);
    };

    if since >= truncate_to_seconds(product.last_updated) {
        ConditionalRead::NotModified
    } else {
        ConditionalRead::Full(product)
    }
}

/// 丢弃亚秒部分
pub fn truncate_to_seconds(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .duration_trunc(TimeDelta::seconds(1))
        .unwrap_or(timestamp)
}

/// 解析 HTTP 日期 (RFC 2822 / IMF-fixdate)，兼容 RFC 3339
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// 格式化为 `Last-Modified` 头使用的 IMF-fixdate
pub fn format_http_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn product_at(timestamp: DateTime<Utc>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "x".to_string(),
            is_active: false,
            last_updated: timestamp,
        }
    }

    fn stored() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap() + TimeDelta::milliseconds(750)
    }

    #[test]
    fn test_no_header_returns_full() {
        let product = product_at(stored());
        assert_eq!(
            evaluate(product.clone(), None),
            ConditionalRead::Full(product)
        );
    }

    #[test]
    fn test_exact_marker_is_not_modified() {
        let product = product_at(stored());
        let marker = format_http_date(product.last_updated);
        assert_eq!(marker, "Tue, 05 Mar 2024 10:20:30 GMT");
        assert_eq!(
            evaluate(product, Some(&marker)),
            ConditionalRead::NotModified
        );
    }

    #[test]
    fn test_later_marker_is_not_modified() {
        let product = product_at(stored());
        assert_eq!(
            evaluate(product, Some("Wed, 06 Mar 2024 00:00:00 GMT")),
            ConditionalRead::NotModified
        );
    }

    #[test]
    fn test_earlier_marker_returns_full() {
        let product = product_at(stored());
        assert!(matches!(
            evaluate(product, Some("Tue, 05 Mar 2024 10:20:29 GMT")),
            ConditionalRead::Full(_)
        ));
    }

    #[test]
    fn test_unparseable_header_returns_full() {
        let product = product_at(stored());
        assert!(matches!(
            evaluate(product, Some("yesterday-ish")),
            ConditionalRead::Full(_)
        ));
    }

    #[test]
    fn test_rfc3339_header_accepted() {
        let product = product_at(stored());
        assert_eq!(
            evaluate(product, Some("2024-03-05T10:20:30Z")),
            ConditionalRead::NotModified
        );
    }

    #[test]
    fn test_truncate_to_seconds() {
        let truncated = truncate_to_seconds(stored());
        assert_eq!(
            truncated,
            Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap()
        );
    }

    #[test]
    fn test_parse_http_date_round_trip() {
        let truncated = truncate_to_seconds(stored());
        assert_eq!(
            parse_http_date(&format_http_date(truncated)),
            Some(truncated)
        );
        assert_eq!(parse_http_date(""), None);
    }
}
