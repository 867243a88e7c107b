//! # 服务发现流水线实现
//!
//! 提供流水线各阶段的具体实现：
//!
//! - [`FileScanner`] - 遍历模块目录，产生候选源文件
//! - [`ClassResolver`] - 路径到类标识符的映射与存在性检查
//! - [`SourceClassIndex`] / [`StaticClassTable`] - 初始化时构建的类符号表
//! - [`DocBlockParser`] - 默认的文档注释块解析器
//! - [`DescriptorBuilder`] - 描述符构建与验证
//! - [`ArgumentResolver`] - 参数树改写
//! - [`order`] / [`emit`] - 排序与发射
//! - [`InMemoryContainerBuilder`] - 内存容器构建器
//! - [`DiscoveryPipeline`] - 把以上阶段串成一次运行

pub mod annotation;
pub mod argument_resolver;
pub mod class_resolver;
pub mod class_table;
pub mod container;
pub mod descriptor_builder;
pub mod emitter;
pub mod orderer;
pub mod pipeline;
pub mod scanner;

pub use annotation::DocBlockParser;
pub use argument_resolver::{
    ArgumentResolver, ReferencePass, ResolutionPass, TaggedGroupPass, REFERENCE_SIGIL,
    TAGGED_PREFIX,
};
pub use class_resolver::ClassResolver;
pub use class_table::{SourceClassIndex, StaticClassTable};
pub use container::InMemoryContainerBuilder;
pub use descriptor_builder::{BuildOutcome, DescriptorBuilder, ServiceAnnotation, TagSpec};
pub use emitter::emit;
pub use orderer::order;
pub use pipeline::DiscoveryPipeline;
pub use scanner::FileScanner;
