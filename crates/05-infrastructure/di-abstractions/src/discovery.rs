//! 元数据解析抽象接口
//!
//! 元数据块的语法解析器是外部协作者，流水线只依赖此接口。

use infrastructure_common::{ClassIdentifier, MetadataError};
use serde_json::Value;

/// Service 注解名称
pub const SERVICE_ANNOTATION: &str = "Service";

/// 原始注解
#[derive(Debug, Clone, PartialEq)]
pub struct RawAnnotation {
    /// 注解名称
    pub name: String,
    /// 注解载荷，没有参数时为 `null`
    pub payload: Value,
}

impl RawAnnotation {
    /// 创建原始注解
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// 是否为 Service 注解
    pub fn is_service(&self) -> bool {
        self.name == SERVICE_ANNOTATION
    }
}

/// 元数据块解析器 trait
pub trait MetadataParser: Send + Sync {
    /// 解析类的文档注释块
    ///
    /// 语法错误以 [`MetadataError`] 返回，调用方不做恢复。
    fn parse(
        &self,
        class: &ClassIdentifier,
        doc_comment: &str,
    ) -> Result<Vec<RawAnnotation>, MetadataError>;

    /// 获取解析器名称
    fn name(&self) -> &str;
}
