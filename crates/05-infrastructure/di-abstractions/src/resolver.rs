//! 类符号表抽象接口

use infrastructure_common::{ClassDefinition, ClassIdentifier};

/// 类符号表 trait
///
/// 在程序初始化时构建，之后只读。类解析器的存在性检查即是对该表的查询。
pub trait ClassTable: Send + Sync {
    /// 查询类定义
    fn lookup(&self, id: &ClassIdentifier) -> Option<&ClassDefinition>;

    /// 表中记录数量
    fn len(&self) -> usize;

    /// 表是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
