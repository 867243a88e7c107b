//! 服务发现配置验证

use globset::Glob;
use infrastructure_common::{ConfigError, ConfigResult, DiscoveryConfig};
use tracing::warn;

/// 验证配置，收集全部问题后一并报告
pub fn validate_config(config: &DiscoveryConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    for error in &errors {
        warn!("配置验证失败: {}", error);
    }
    Err(ConfigError::ValidationFailed { errors })
}

/// 列出配置中的全部问题
pub fn collect_errors(config: &DiscoveryConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.environment.trim().is_empty() {
        errors.push("environment 不能为空".to_string());
    }

    if config.scan.file_patterns.is_empty() {
        errors.push("scan.file_patterns 至少需要一个匹配模式".to_string());
    }
    for pattern in &config.scan.file_patterns {
        if let Err(e) = Glob::new(pattern) {
            errors.push(format!("scan.file_patterns 中的模式无效: {pattern} ({e})"));
        }
    }

    if config.resolver.namespace_separator.is_empty() {
        errors.push("resolver.namespace_separator 不能为空".to_string());
    }

    for (index, module) in config.modules.iter().enumerate() {
        if module.path.as_os_str().is_empty() {
            errors.push(format!("modules[{index}].path 不能为空"));
        }
    }

    errors
}
