//! 约定规范定义
//!
//! 提供源文件路径到类标识符的映射规则

use crate::metadata::ClassIdentifier;
use std::path::{Component, Path};

/// 默认命名空间分隔符
pub const DEFAULT_NAMESPACE_SEPARATOR: &str = "\\";

/// 命名约定规范
#[derive(Debug, Clone)]
pub struct NamingConventions {
    separator: String,
}

impl NamingConventions {
    /// 使用指定分隔符创建命名约定
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// 命名空间分隔符
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// 从相对路径和命名空间前缀推导类标识符
    ///
    /// 去掉文件后缀，把路径分隔符替换为命名空间分隔符，再拼接前缀。
    /// 纯函数，不做任何 I/O。
    pub fn class_identifier(&self, relative_path: &Path, namespace_prefix: &str) -> ClassIdentifier {
        let mut segments: Vec<String> = relative_path
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if let Some(last) = segments.last_mut() {
            if let Some(stem) = Path::new(last.as_str()).file_stem() {
                *last = stem.to_string_lossy().into_owned();
            }
        }

        let prefix = namespace_prefix.trim_end_matches(self.separator.as_str());
        let relative = segments.join(&self.separator);

        if prefix.is_empty() {
            ClassIdentifier::new(relative)
        } else {
            ClassIdentifier::new(format!("{}{}{}", prefix, self.separator, relative))
        }
    }

    /// 拼接命名空间和短类名
    pub fn qualify(&self, namespace: Option<&str>, short_name: &str) -> ClassIdentifier {
        match namespace.map(|ns| ns.trim_matches(|c: char| self.separator.contains(c))) {
            Some(ns) if !ns.is_empty() => {
                ClassIdentifier::new(format!("{}{}{}", ns, self.separator, short_name))
            }
            _ => ClassIdentifier::new(short_name),
        }
    }
}

impl Default for NamingConventions {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE_SEPARATOR)
    }
}
