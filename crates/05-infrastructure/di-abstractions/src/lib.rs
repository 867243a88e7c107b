//! # Dependency Injection Abstractions
//!
//! 服务发现抽象层，定义流水线与外部协作者之间的接口。
//!
//! ## 核心接口
//!
//! - [`SourceScanner`] - 源文件扫描器接口
//! - [`ClassTable`] - 类符号表接口
//! - [`MetadataParser`] - 元数据块解析器接口
//! - [`ContainerBuilder`] - 容器构建器接口

pub mod container;
pub mod discovery;
pub mod resolver;
pub mod scanner;

pub use container::*;
pub use discovery::*;
pub use resolver::*;
pub use scanner::*;
