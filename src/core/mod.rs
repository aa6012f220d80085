//! 核心层：结果类型、错误处理、响应结构和中间件

pub mod error;
pub mod middleware;
pub mod response;
pub mod result;
