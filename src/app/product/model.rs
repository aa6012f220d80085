//! 产品数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 产品
///
/// `last_updated` 由仓储在创建和更新时写入，请求体中的值不会被信任。
/// 请求体未提供 `id` 时生成新的 UUID。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Product {
    pub fn new(id: Uuid, name: impl Into<String>, is_active: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_active,
            last_updated: Utc::now(),
        }
    }
}

impl Default for Product {
    fn default() -> Self {
        Self::new(Uuid::new_v4(), "", false)
    }
}
