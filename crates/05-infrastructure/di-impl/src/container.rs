//! 内存容器构建器

use di_abstractions::ContainerBuilder;
use indexmap::IndexMap;
use infrastructure_common::{ConstructionDirective, DependencyError};
use tracing::warn;

/// 按注册标识符保存指令的内存构建器
///
/// 重复定义时后写入者生效，但保留首次定义的位置。
#[derive(Debug, Clone, Default)]
pub struct InMemoryContainerBuilder {
    directives: IndexMap<String, ConstructionDirective>,
}

impl InMemoryContainerBuilder {
    /// 创建空的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 按注册标识符获取指令
    pub fn get(&self, id: &str) -> Option<&ConstructionDirective> {
        self.directives.get(id)
    }

    /// 指令数量
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// 按定义顺序遍历指令
    pub fn directives(&self) -> impl Iterator<Item = &ConstructionDirective> {
        self.directives.values()
    }

    /// 取出全部指令
    pub fn into_directives(self) -> Vec<ConstructionDirective> {
        self.directives.into_values().collect()
    }
}

impl ContainerBuilder for InMemoryContainerBuilder {
    fn define(&mut self, directive: ConstructionDirective) -> Result<(), DependencyError> {
        let id = directive.id.clone();
        if let Some(previous) = self.directives.insert(id, directive) {
            warn!(
                "注册标识符重复定义，后者覆盖前者: {} ({} 被替换)",
                previous.id, previous.class
            );
        }
        Ok(())
    }
}
