//! 类解析器实现

use di_abstractions::ClassTable;
use infrastructure_common::{ClassDefinition, ClassIdentifier, NamingConventions};
use std::path::Path;

/// 类解析器
///
/// 路径映射是纯函数；存在性检查查询初始化时构建的符号表。
pub struct ClassResolver {
    conventions: NamingConventions,
    table: Box<dyn ClassTable>,
}

impl ClassResolver {
    /// 创建新的类解析器
    pub fn new(conventions: NamingConventions, table: Box<dyn ClassTable>) -> Self {
        Self { conventions, table }
    }

    /// 从相对路径和命名空间前缀推导类标识符
    pub fn resolve(&self, relative_path: &Path, namespace_prefix: &str) -> ClassIdentifier {
        self.conventions
            .class_identifier(relative_path, namespace_prefix)
    }

    /// 标识符是否指向可加载的类
    pub fn exists(&self, id: &ClassIdentifier) -> bool {
        self.definition(id).is_some()
    }

    /// 获取可加载类的定义
    ///
    /// 接口和 trait 不是可加载的类，返回 `None`。
    pub fn definition(&self, id: &ClassIdentifier) -> Option<&ClassDefinition> {
        self.table
            .lookup(id)
            .filter(|definition| definition.is_loadable_class())
    }

    /// 命名约定
    pub fn conventions(&self) -> &NamingConventions {
        &self.conventions
    }
}

impl std::fmt::Debug for ClassResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassResolver")
            .field("conventions", &self.conventions)
            .field("classes", &self.table.len())
            .finish()
    }
}
