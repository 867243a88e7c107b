//! 参数解析器
//!
//! 把参数树中带标记的字符串叶子改写为类型化节点。每一遍改写都是保持结构的递归遍历：
//! 列表和映射原样保留顺序与键，只有字符串字面值可能被替换。

use infrastructure_common::{ArgumentTree, ServiceDescriptor};

/// 引用标记
pub const REFERENCE_SIGIL: &str = "@";

/// 标签组引用前缀
pub const TAGGED_PREFIX: &str = "!tagged ";

/// 单遍改写规则
pub trait ResolutionPass: Send + Sync {
    /// 改写一个字符串叶子，返回 `None` 表示保持为字面值
    fn rewrite_leaf(&self, value: &str) -> Option<ArgumentTree>;

    /// 递归改写整棵树
    fn apply(&self, tree: ArgumentTree) -> ArgumentTree {
        match tree {
            ArgumentTree::Literal(serde_json::Value::String(value)) => self
                .rewrite_leaf(&value)
                .unwrap_or(ArgumentTree::Literal(serde_json::Value::String(value))),
            ArgumentTree::List(items) => {
                ArgumentTree::List(items.into_iter().map(|item| self.apply(item)).collect())
            }
            ArgumentTree::Map(entries) => ArgumentTree::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, self.apply(value)))
                    .collect(),
            ),
            other => other,
        }
    }
}

/// `@target` 改写为 [`ArgumentTree::Reference`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferencePass;

impl ResolutionPass for ReferencePass {
    fn rewrite_leaf(&self, value: &str) -> Option<ArgumentTree> {
        value
            .strip_prefix(REFERENCE_SIGIL)
            .map(ArgumentTree::reference)
    }
}

/// `!tagged name` 改写为 [`ArgumentTree::TaggedGroupReference`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedGroupPass;

impl ResolutionPass for TaggedGroupPass {
    fn rewrite_leaf(&self, value: &str) -> Option<ArgumentTree> {
        value.strip_prefix(TAGGED_PREFIX).map(ArgumentTree::tagged)
    }
}

/// 参数解析器，按固定顺序执行全部改写
pub struct ArgumentResolver {
    passes: Vec<Box<dyn ResolutionPass>>,
}

impl ArgumentResolver {
    /// 创建默认解析器：先引用改写，再标签组改写
    pub fn new() -> Self {
        Self {
            passes: vec![Box::new(ReferencePass), Box::new(TaggedGroupPass)],
        }
    }

    /// 解析一棵参数树，从不失败
    pub fn resolve(&self, tree: ArgumentTree) -> ArgumentTree {
        self.passes
            .iter()
            .fold(tree, |tree, pass| pass.apply(tree))
    }

    /// 原地解析描述符的 `arguments` 和 `factory`
    pub fn resolve_descriptor(&self, mut descriptor: ServiceDescriptor) -> ServiceDescriptor {
        descriptor.arguments = self.resolve(std::mem::take(&mut descriptor.arguments));
        descriptor.factory = descriptor.factory.take().map(|factory| self.resolve(factory));
        descriptor
    }
}

impl Default for ArgumentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ArgumentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentResolver")
            .field("passes", &self.passes.len())
            .finish()
    }
}
