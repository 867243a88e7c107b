//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn ADSP 服务发现流水线的公共数据模型、错误类型和配置类型。
//!
//! ## 核心类型
//!
//! - [`ModuleMetadata`] - 模块根目录与命名空间前缀
//! - [`ClassDefinition`] - 符号表中的类记录
//! - [`ServiceDescriptor`] - 经过验证的服务描述符
//! - [`ArgumentTree`] - 参数树
//! - [`ConstructionDirective`] - 交给容器构建器的构造指令
//! - [`NamingConventions`] - 路径到类标识符的映射规则
//! - [`DiscoveryConfig`] - 服务发现配置

pub mod argument;
pub mod configuration;
pub mod conventions;
pub mod descriptor;
pub mod errors;
pub mod metadata;

pub use argument::*;
pub use configuration::*;
pub use conventions::*;
pub use descriptor::*;
pub use errors::*;
pub use metadata::*;
