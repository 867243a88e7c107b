//! 描述符构建与验证

use di_abstractions::{MetadataParser, RawAnnotation};
use indexmap::IndexMap;
use infrastructure_common::{
    ArgumentTree, ClassDefinition, DiscoveryResult, MetadataError, MethodCall, ServiceDescriptor,
    ServiceFlags, TagDefinition, ValidationError,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Service 注解的载荷
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceAnnotation {
    /// 注册标识符，缺省时使用类标识符
    pub id: Option<String>,
    /// 是否自动装配
    pub autowired: bool,
    /// 是否自动配置
    pub autoconfigured: bool,
    /// 是否延迟构造
    pub lazy: bool,
    /// 是否公开
    pub public: bool,
    /// 是否为抽象定义
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    /// 排序优先级，越小越靠前
    pub priority: i32,
    /// 允许的环境，为空表示全部环境
    pub envs: Vec<String>,
    /// 是否要求类只有一个公共方法
    pub single_method_constraint: bool,
    /// 未解析的构造参数
    pub arguments: Value,
    /// 标签
    pub tags: Vec<TagSpec>,
    /// 构造后调用的方法，原样透传
    pub method_calls: Vec<MethodCall>,
    /// 未解析的工厂表达式
    pub factory: Option<Value>,
    /// 被装饰的注册标识符
    pub decorates: Option<String>,
}

impl Default for ServiceAnnotation {
    fn default() -> Self {
        let flags = ServiceFlags::default();
        Self {
            id: None,
            autowired: flags.autowired,
            autoconfigured: flags.autoconfigured,
            lazy: flags.lazy,
            public: flags.public,
            is_abstract: flags.is_abstract,
            priority: 0,
            envs: Vec::new(),
            single_method_constraint: false,
            arguments: Value::Array(Vec::new()),
            tags: Vec::new(),
            method_calls: Vec::new(),
            factory: None,
            decorates: None,
        }
    }
}

impl ServiceAnnotation {
    /// 从原始注解载荷反序列化，`null` 表示全部取默认值
    pub fn from_raw(class: &str, raw: &RawAnnotation) -> Result<Self, MetadataError> {
        if raw.payload.is_null() {
            return Ok(Self::default());
        }

        Self::deserialize(&raw.payload).map_err(|source| MetadataError::InvalidAnnotation {
            class: class.to_string(),
            source,
        })
    }

    fn into_descriptor(self, definition: &ClassDefinition) -> ServiceDescriptor {
        let mut descriptor = ServiceDescriptor::new(definition.id.clone());
        descriptor.id = self.id;
        descriptor.flags = ServiceFlags {
            autowired: self.autowired,
            autoconfigured: self.autoconfigured,
            lazy: self.lazy,
            public: self.public,
            is_abstract: self.is_abstract,
        };
        descriptor.priority = self.priority;
        descriptor.envs = self.envs.into_iter().collect();
        descriptor.single_method_constraint = self.single_method_constraint;
        descriptor.arguments = ArgumentTree::from_value(self.arguments);
        descriptor.tags = self.tags.into_iter().map(TagSpec::into_definition).collect();
        descriptor.method_calls = self.method_calls;
        descriptor.factory = self.factory.map(ArgumentTree::from_value);
        descriptor.decorates = self.decorates;
        descriptor
    }
}

/// 标签声明：仅名称，或名称加属性
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagSpec {
    /// `"name"`
    Name(String),
    /// `{"name": ..., <属性>}`
    Detailed {
        /// 标签名
        name: String,
        /// 其余键作为标签属性，保持声明顺序
        #[serde(flatten)]
        attributes: IndexMap<String, Value>,
    },
}

impl TagSpec {
    fn into_definition(self) -> TagDefinition {
        match self {
            Self::Name(name) => TagDefinition::new(name),
            Self::Detailed { name, attributes } => TagDefinition { name, attributes },
        }
    }
}

/// 单个类的构建结果
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// 产生了描述符
    Registered(ServiceDescriptor),
    /// 类没有文档注释块
    Undocumented,
    /// 文档注释块中没有 Service 注解
    NotService,
    /// 描述符不适用于当前环境
    EnvironmentExcluded,
}

/// 描述符构建器
pub struct DescriptorBuilder {
    parser: Box<dyn MetadataParser>,
    environment: String,
}

impl DescriptorBuilder {
    /// 创建新的描述符构建器
    pub fn new(parser: Box<dyn MetadataParser>, environment: impl Into<String>) -> Self {
        Self {
            parser,
            environment: environment.into(),
        }
    }

    /// 当前环境
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// 为一个可加载的类构建描述符
    ///
    /// 解析失败和单一公共方法约束违反是致命错误；其余情况以
    /// [`BuildOutcome`] 报告跳过原因。
    pub fn build(&self, definition: &ClassDefinition) -> DiscoveryResult<BuildOutcome> {
        let class = definition.id.as_str();

        let Some(doc_comment) = definition.doc_comment.as_deref() else {
            return Ok(BuildOutcome::Undocumented);
        };

        let annotations = self.parser.parse(&definition.id, doc_comment)?;
        let Some(raw) = annotations.iter().find(|annotation| annotation.is_service()) else {
            return Ok(BuildOutcome::NotService);
        };

        let descriptor = ServiceAnnotation::from_raw(class, raw)?.into_descriptor(definition);

        if descriptor.single_method_constraint {
            check_single_method(definition)?;
        }

        if !descriptor.applies_to(&self.environment) {
            debug!(
                "环境 {} 不在 {:?} 中，跳过: {}",
                self.environment, descriptor.envs, class
            );
            return Ok(BuildOutcome::EnvironmentExcluded);
        }

        Ok(BuildOutcome::Registered(descriptor))
    }
}

impl std::fmt::Debug for DescriptorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorBuilder")
            .field("parser", &self.parser.name())
            .field("environment", &self.environment)
            .finish()
    }
}

fn check_single_method(definition: &ClassDefinition) -> Result<(), ValidationError> {
    let methods: Vec<String> = definition
        .public_methods()
        .map(|method| method.name.clone())
        .collect();

    if methods.len() > 1 {
        return Err(ValidationError::SingleMethodViolation {
            class: definition.id.to_string(),
            methods,
        });
    }
    Ok(())
}
