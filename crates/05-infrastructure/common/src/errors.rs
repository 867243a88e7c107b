//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {}", .errors.join("; "))]
    ValidationFailed { errors: Vec<String> },
}

/// 元数据块解析错误
///
/// 文档注释块存在但语法不合法时产生，属于致命错误。
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("元数据块解析失败: {class}, 原因: {message}")]
    Syntax { class: String, message: String },

    #[error("Service 注解字段无效: {class}, 原因: {source}")]
    InvalidAnnotation {
        class: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MetadataError {
    /// 创建语法错误
    pub fn syntax(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Syntax {
            class: class.into(),
            message: message.into(),
        }
    }
}

/// 描述符验证错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("单一公共方法约束被违反: {class} 暴露了 {} 个公共方法 ({})", .methods.len(), .methods.join(", "))]
    SingleMethodViolation { class: String, methods: Vec<String> },
}

/// 容器注册错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件注册失败: {id}, 原因: {message}")]
    RegistrationError { id: String, message: String },
}

/// 服务发现流水线错误类型
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("模块扫描失败: {module}, 原因: {source}")]
    ScanFailed {
        module: String,
        #[source]
        source: std::io::Error,
    },

    #[error("文件匹配模式无效: {pattern}, 原因: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("元数据错误: {source}")]
    MetadataError {
        #[from]
        source: MetadataError,
    },

    #[error("验证错误: {source}")]
    ValidationError {
        #[from]
        source: ValidationError,
    },

    #[error("依赖注册错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },
}

impl DiscoveryError {
    /// 创建扫描错误
    pub fn scan_failed(module: impl Into<String>, source: std::io::Error) -> Self {
        Self::ScanFailed {
            module: module.into(),
            source,
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
