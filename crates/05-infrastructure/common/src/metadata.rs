//! 元数据定义
//!
//! 提供模块、候选文件和类的元数据信息

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 模块元数据
///
/// 由宿主提供，只读。每个模块对应一个源码根目录和一个命名空间前缀。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// 模块根目录
    pub path: PathBuf,
    /// 命名空间前缀
    #[serde(alias = "namespace")]
    pub namespace_prefix: String,
}

impl ModuleMetadata {
    /// 创建新的模块元数据
    pub fn new(path: impl Into<PathBuf>, namespace_prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace_prefix: namespace_prefix.into(),
        }
    }

    /// 模块根路径是否包含任一第三方标记段
    pub fn is_vendored<S: AsRef<str>>(&self, markers: &[S]) -> bool {
        self.path.components().any(|component| {
            let segment = component.as_os_str();
            markers.iter().any(|marker| segment == marker.as_ref())
        })
    }
}

/// 候选文件
///
/// 由文件扫描器临时产生，路径相对于模块根目录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// 模块根目录
    pub root: PathBuf,
    /// 相对路径
    pub relative_path: PathBuf,
}

impl CandidateFile {
    /// 创建新的候选文件
    pub fn new(root: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            relative_path: relative_path.into(),
        }
    }

    /// 获取完整路径
    pub fn absolute_path(&self) -> PathBuf {
        self.root.join(&self.relative_path)
    }

    /// 获取相对路径
    pub fn relative(&self) -> &Path {
        &self.relative_path
    }
}

/// 全限定类标识符
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassIdentifier(String);

impl ClassIdentifier {
    /// 创建类标识符
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 获取字符串表示
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClassIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 类声明种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    Interface,
    Trait,
    Enum,
}

/// 方法可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// 方法角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodRole {
    Constructor,
    Destructor,
    #[default]
    Regular,
}

/// 方法签名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    /// 方法名称
    pub name: String,
    /// 可见性
    pub visibility: Visibility,
    /// 方法角色
    pub role: MethodRole,
}

impl MethodSignature {
    /// 创建公共普通方法
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            role: MethodRole::Regular,
        }
    }

    /// 设置可见性
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// 设置方法角色
    pub fn with_role(mut self, role: MethodRole) -> Self {
        self.role = role;
        self
    }

    /// 是否计入单一公共方法约束
    ///
    /// 静态方法同样计入。
    pub fn is_public_api(&self) -> bool {
        self.visibility == Visibility::Public && self.role == MethodRole::Regular
    }
}

/// 类定义
///
/// 符号表中的一条记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// 类标识符
    pub id: ClassIdentifier,
    /// 声明种类
    pub kind: ClassKind,
    /// 紧邻声明的文档注释块
    pub doc_comment: Option<String>,
    /// 声明的方法
    pub methods: Vec<MethodSignature>,
}

impl ClassDefinition {
    /// 创建新的类定义
    pub fn new(id: impl Into<ClassIdentifier>, kind: ClassKind) -> Self {
        Self {
            id: id.into(),
            kind,
            doc_comment: None,
            methods: Vec::new(),
        }
    }

    /// 创建普通类定义
    pub fn class(id: impl Into<ClassIdentifier>) -> Self {
        Self::new(id, ClassKind::Class)
    }

    /// 设置文档注释块
    pub fn with_doc_comment(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    /// 添加方法
    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self
    }

    /// 是否为可加载的类
    ///
    /// 枚举和类一样可以加载；接口和 trait 不行。
    pub fn is_loadable_class(&self) -> bool {
        matches!(self.kind, ClassKind::Class | ClassKind::Enum)
    }

    /// 公共普通方法（不包含构造和析构）
    pub fn public_methods(&self) -> impl Iterator<Item = &MethodSignature> {
        self.methods.iter().filter(|method| method.is_public_api())
    }
}
