//! 基础设施层：外部同步和日志

pub mod acl;
pub mod logger;
