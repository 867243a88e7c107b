//! 服务描述符与构造指令

use crate::argument::ArgumentTree;
use crate::metadata::ClassIdentifier;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// 构造标志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFlags {
    /// 是否自动装配
    pub autowired: bool,
    /// 是否自动配置
    pub autoconfigured: bool,
    /// 是否延迟初始化
    pub lazy: bool,
    /// 是否公开
    pub public: bool,
    /// 是否为抽象定义
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
}

impl Default for ServiceFlags {
    fn default() -> Self {
        Self {
            autowired: true,
            autoconfigured: true,
            lazy: false,
            public: false,
            is_abstract: false,
        }
    }
}

/// 标签定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDefinition {
    /// 标签名称
    pub name: String,
    /// 标签属性
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
}

impl TagDefinition {
    /// 创建无属性标签
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// 添加属性
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// 方法调用定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// 方法名称
    pub method: String,
    /// 调用参数
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl MethodCall {
    /// 创建方法调用
    pub fn new(method: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// 服务描述符
///
/// 每个符合条件的类产生一个。验证之后只有 `arguments` 和 `factory`
/// 会被参数解析器原地改写。
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescriptor {
    /// 类标识符
    pub class_id: ClassIdentifier,
    /// 显式声明的注册标识符
    pub id: Option<String>,
    /// 构造标志
    pub flags: ServiceFlags,
    /// 优先级，数值越小越先注册
    pub priority: i32,
    /// 适用环境，为空表示全部环境
    pub envs: BTreeSet<String>,
    /// 是否要求单一公共方法
    pub single_method_constraint: bool,
    /// 构造参数
    pub arguments: ArgumentTree,
    /// 标签
    pub tags: Vec<TagDefinition>,
    /// 方法调用
    pub method_calls: Vec<MethodCall>,
    /// 工厂定义
    pub factory: Option<ArgumentTree>,
    /// 装饰目标
    pub decorates: Option<String>,
}

impl ServiceDescriptor {
    /// 创建使用默认设置的描述符
    pub fn new(class_id: impl Into<ClassIdentifier>) -> Self {
        Self {
            class_id: class_id.into(),
            id: None,
            flags: ServiceFlags::default(),
            priority: 0,
            envs: BTreeSet::new(),
            single_method_constraint: false,
            arguments: ArgumentTree::empty(),
            tags: Vec::new(),
            method_calls: Vec::new(),
            factory: None,
            decorates: None,
        }
    }

    /// 设置注册标识符
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 添加适用环境
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.envs.insert(env.into());
        self
    }

    /// 设置构造参数
    pub fn with_arguments(mut self, arguments: ArgumentTree) -> Self {
        self.arguments = arguments;
        self
    }

    /// 添加标签
    pub fn with_tag(mut self, tag: TagDefinition) -> Self {
        self.tags.push(tag);
        self
    }

    /// 注册标识符：显式 `id` 优先，否则为类标识符
    pub fn registration_id(&self) -> &str {
        self.id.as_deref().unwrap_or_else(|| self.class_id.as_str())
    }

    /// 在指定环境下是否适用
    pub fn applies_to(&self, environment: &str) -> bool {
        self.envs.is_empty() || self.envs.contains(environment)
    }
}

/// 构造指令
///
/// 交给外部容器构建器的只读记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionDirective {
    /// 注册标识符
    pub id: String,
    /// 类标识符
    pub class: ClassIdentifier,
    /// 构造标志
    #[serde(flatten)]
    pub flags: ServiceFlags,
    /// 已解析的构造参数
    pub arguments: ArgumentTree,
    /// 标签
    pub tags: Vec<TagDefinition>,
    /// 方法调用
    pub method_calls: Vec<MethodCall>,
    /// 已解析的工厂定义
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<ArgumentTree>,
    /// 装饰目标
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorates: Option<String>,
}

impl From<ServiceDescriptor> for ConstructionDirective {
    fn from(descriptor: ServiceDescriptor) -> Self {
        let id = descriptor.registration_id().to_string();
        Self {
            id,
            class: descriptor.class_id,
            flags: descriptor.flags,
            arguments: descriptor.arguments,
            tags: descriptor.tags,
            method_calls: descriptor.method_calls,
            factory: descriptor.factory,
            decorates: descriptor.decorates,
        }
    }
}
