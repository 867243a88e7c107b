//! 源文件扫描器抽象接口
//!
//! 提供遍历模块目录、产生候选源文件的能力

use infrastructure_common::{CandidateFile, DiscoveryResult, ModuleMetadata};

/// 候选文件序列
///
/// 惰性、有限、不可重启。
pub type CandidateFiles<'a> = Box<dyn Iterator<Item = DiscoveryResult<CandidateFile>> + 'a>;

/// 源文件扫描器 trait
pub trait SourceScanner: Send + Sync {
    /// 扫描指定模块，产生候选文件
    ///
    /// 第三方模块直接产生空序列。目录无法枚举时序列中返回错误。
    fn scan<'a>(&'a self, module: &'a ModuleMetadata) -> CandidateFiles<'a>;

    /// 获取扫描器名称
    fn name(&self) -> &str;

    /// 模块是否会被整体跳过
    fn skips(&self, module: &ModuleMetadata) -> bool;
}
