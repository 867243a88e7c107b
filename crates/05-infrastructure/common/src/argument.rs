//! 参数树定义
//!
//! 描述符中的构造参数和工厂定义都以参数树表示。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 参数树
///
/// 映射的键在输出时保持声明顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ArgumentTree {
    /// 字面值
    Literal(Value),
    /// 对另一个注册标识符的引用
    Reference(String),
    /// 对带有指定标签的全部条目的引用
    TaggedGroupReference(String),
    /// 列表
    List(Vec<ArgumentTree>),
    /// 映射
    Map(IndexMap<String, ArgumentTree>),
}

impl ArgumentTree {
    /// 空参数列表
    pub fn empty() -> Self {
        Self::List(Vec::new())
    }

    /// 创建字符串字面值
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// 创建引用
    pub fn reference(target: impl Into<String>) -> Self {
        Self::Reference(target.into())
    }

    /// 创建标签组引用
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self::TaggedGroupReference(tag.into())
    }

    /// 从 JSON 值构建未解析的参数树
    ///
    /// 标量成为字面值，数组成为列表，对象成为映射。
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_value).collect()),
            Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from_value(value)))
                    .collect(),
            ),
            scalar => Self::Literal(scalar),
        }
    }

    /// 收集树中的所有引用目标，按遍历顺序
    pub fn references(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.collect_references(&mut found);
        found
    }

    fn collect_references<'a>(&'a self, found: &mut Vec<&'a str>) {
        match self {
            Self::Reference(target) => found.push(target),
            Self::List(items) => items.iter().for_each(|item| item.collect_references(found)),
            Self::Map(entries) => entries
                .values()
                .for_each(|value| value.collect_references(found)),
            Self::Literal(_) | Self::TaggedGroupReference(_) => {}
        }
    }
}

impl Default for ArgumentTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for ArgumentTree {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
