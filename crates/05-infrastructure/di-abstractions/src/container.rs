//! 容器构建器抽象接口
//!
//! 发射阶段是唯一调用构建器的地方。

use infrastructure_common::{ConstructionDirective, DependencyError};
use serde::Serialize;

/// 容器构建器 trait
pub trait ContainerBuilder {
    /// 以指令的注册标识符定义一个服务
    ///
    /// 同一标识符重复定义时后写入者生效。
    fn define(&mut self, directive: ConstructionDirective) -> Result<(), DependencyError>;
}

impl<T: ContainerBuilder + ?Sized> ContainerBuilder for &mut T {
    fn define(&mut self, directive: ConstructionDirective) -> Result<(), DependencyError> {
        (**self).define(directive)
    }
}

/// 服务发现统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryStats {
    /// 已扫描模块数量
    pub modules_scanned: usize,
    /// 作为第三方代码跳过的模块数量
    pub modules_vendored: usize,
    /// 候选文件数量
    pub candidate_files: usize,
    /// 无法解析为类的候选数量
    pub unresolved_classes: usize,
    /// 没有文档注释块的类数量
    pub undocumented_classes: usize,
    /// 没有 Service 注解的类数量
    pub non_service_classes: usize,
    /// 被环境过滤的描述符数量
    pub environment_excluded: usize,
    /// 已发射的指令数量
    pub directives_emitted: usize,
}

impl DiscoveryStats {
    /// 被静默跳过的候选总数
    pub fn skipped(&self) -> usize {
        self.unresolved_classes
            + self.undocumented_classes
            + self.non_service_classes
            + self.environment_excluded
    }
}
