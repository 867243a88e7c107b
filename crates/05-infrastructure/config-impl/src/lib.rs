//! # Configuration Implementation
//!
//! 服务发现配置的加载与验证。
//!
//! ## 主要组件
//!
//! - [`DiscoveryConfigLoader`] - 分层加载配置文件与环境变量
//! - [`validate_config`] - 配置验证

pub mod loader;
pub mod validation;

pub use loader::*;
pub use validation::*;
