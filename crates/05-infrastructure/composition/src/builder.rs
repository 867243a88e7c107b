//! 服务发现构建器

use crate::runner::DiscoveryRunner;
use config_impl::{validate_config, DiscoveryConfigLoader};
use di_abstractions::{ClassTable, MetadataParser};
use di_impl::{DiscoveryPipeline, DocBlockParser};
use infrastructure_common::{DiscoveryConfig, DiscoveryResult, ModuleMetadata};
use std::path::Path;
use tracing::{debug, info};

/// 服务发现构建器
///
/// 使用建造者模式组装一次服务发现运行
pub struct DiscoveryBuilder {
    /// 服务发现配置
    config: DiscoveryConfig,
    /// 元数据解析器，未设置时使用 [`DocBlockParser`]
    parser: Option<Box<dyn MetadataParser>>,
    /// 类符号表，未设置时从源码索引
    class_table: Option<Box<dyn ClassTable>>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl DiscoveryBuilder {
    /// 创建新的服务发现构建器
    pub fn new() -> Self {
        Self {
            config: DiscoveryConfig::default(),
            parser: None,
            class_table: None,
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 使用已有配置
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    /// 从配置文件加载配置，环境变量覆盖生效
    pub fn load_config<P: AsRef<Path>>(mut self, path: P) -> DiscoveryResult<Self> {
        let path = path.as_ref();
        info!("加载服务发现配置: {}", path.display());
        self.config = DiscoveryConfigLoader::new().with_config_path(path).load()?;
        Ok(self)
    }

    /// 添加模块
    pub fn add_module<P: AsRef<Path>>(mut self, path: P, namespace: impl Into<String>) -> Self {
        let module = ModuleMetadata::new(path.as_ref(), namespace);
        debug!("添加模块: {} ({})", module.path.display(), module.namespace_prefix);
        self.config.modules.push(module);
        self
    }

    /// 设置当前环境
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.config.environment = environment.into();
        self
    }

    /// 设置元数据解析器
    pub fn with_parser(mut self, parser: Box<dyn MetadataParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// 使用宿主提供的类符号表
    pub fn with_class_table(mut self, table: Box<dyn ClassTable>) -> Self {
        self.class_table = Some(table);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 当前配置
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// 构建运行器
    pub fn build(self) -> DiscoveryResult<DiscoveryRunner> {
        // 只有在明确配置了日志时才初始化日志
        if self.logging_enabled {
            self.logging_config.initialize();
        }

        info!("开始构建服务发现流水线");
        validate_config(&self.config)?;

        let parser = self
            .parser
            .unwrap_or_else(|| Box::new(DocBlockParser::new()));
        let pipeline = DiscoveryPipeline::from_config(&self.config, parser, self.class_table)?;

        info!("服务发现流水线构建完成: {:?}", pipeline);
        Ok(DiscoveryRunner::new(self.config, pipeline))
    }
}

impl Default for DiscoveryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 设置日志级别
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// 安装全局日志订阅者
    ///
    /// 已有订阅者时保持原状，返回 `false`。
    pub fn initialize(&self) -> bool {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_file)
            .with_line_number(self.show_line_number)
            .with_writer(std::io::stderr);

        let result = if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        };

        match result {
            Ok(()) => {
                info!("日志系统初始化完成");
                true
            }
            Err(e) => {
                debug!("日志系统已初始化，跳过: {}", e);
                false
            }
        }
    }
}
