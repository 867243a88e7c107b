//! 服务发现配置加载器
//!
//! 配置按以下顺序合并，后者覆盖前者：
//! 1. `DiscoveryConfig` 的内置默认值
//! 2. 配置文件（TOML 或 JSON，按扩展名判断）
//! 3. 带前缀的环境变量，嵌套键用 `__` 分隔（如 `DISCOVERY_SCAN__SORTED=false`）

use crate::validation::validate_config;
use config::{Config, Environment};
use infrastructure_common::{ConfigError, ConfigResult, DiscoveryConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "DISCOVERY";

/// 配置加载器
#[derive(Debug, Clone)]
pub struct DiscoveryConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for DiscoveryConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoveryConfigLoader {
    /// 创建使用默认前缀、不读取文件的加载器
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// 设置配置文件路径
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 配置文件路径
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// 加载、合并并验证配置
    ///
    /// 配置文件中的相对模块路径以配置文件所在目录为基准。
    pub fn load(&self) -> ConfigResult<DiscoveryConfig> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: DiscoveryConfig = builder
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        if let Some(base) = self.config_path.as_deref().and_then(Path::parent) {
            for module in &mut config.modules {
                if module.path.is_relative() {
                    module.path = base.join(&module.path);
                }
            }
        }

        validate_config(&config)?;

        info!(
            "服务发现配置加载完成: 环境 {}, {} 个模块",
            config.environment,
            config.modules.len()
        );
        Ok(config)
    }

    /// 把配置写入 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(config: &DiscoveryConfig, path: P) -> ConfigResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}
