//! 配置相关的基础类型定义

use crate::metadata::ModuleMetadata;
use serde::{Deserialize, Serialize};

/// 服务发现配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// 当前激活的环境名称
    pub environment: String,
    /// 扫描配置
    pub scan: ScanConfig,
    /// 类解析配置
    pub resolver: ResolverConfig,
    /// 待扫描的模块
    pub modules: Vec<ModuleMetadata>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            scan: ScanConfig::default(),
            resolver: ResolverConfig::default(),
            modules: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// 设置环境
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// 添加模块
    pub fn with_module(mut self, module: ModuleMetadata) -> Self {
        self.modules.push(module);
        self
    }
}

/// 扫描配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 文件名匹配模式
    pub file_patterns: Vec<String>,
    /// 排除的路径段（区分大小写）
    pub excluded_dirs: Vec<String>,
    /// 第三方代码标记段
    pub vendor_markers: Vec<String>,
    /// 是否跟随符号链接
    pub follow_links: bool,
    /// 是否按文件名顺序遍历
    pub sorted: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            file_patterns: vec!["*.php".to_string()],
            excluded_dirs: vec![
                "tests".to_string(),
                "Tests".to_string(),
                "DependencyInjection".to_string(),
                "Resources".to_string(),
            ],
            vendor_markers: vec!["vendor".to_string()],
            follow_links: false,
            sorted: true,
        }
    }
}

/// 类解析配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// 命名空间分隔符
    pub namespace_separator: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            namespace_separator: crate::conventions::DEFAULT_NAMESPACE_SEPARATOR.to_string(),
        }
    }
}
