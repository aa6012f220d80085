//! 产品资源：模型、内存仓储、条件读取策略和 HTTP 处理器

pub mod cache;
pub mod handler;
pub mod model;
pub mod store;
