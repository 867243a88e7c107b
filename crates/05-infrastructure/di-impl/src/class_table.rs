//! 类符号表实现
//!
//! [`StaticClassTable`] 是内存中的符号表，宿主可以直接填充；
//! [`SourceClassIndex`] 在初始化时遍历源码树，把每个文件声明的类登记进表。

use di_abstractions::{ClassTable, SourceScanner};
use infrastructure_common::{
    ClassDefinition, ClassIdentifier, ClassKind, DiscoveryResult, MethodRole, MethodSignature,
    ModuleMetadata, NamingConventions, Visibility,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// 内存中的类符号表
#[derive(Debug, Clone, Default)]
pub struct StaticClassTable {
    classes: HashMap<ClassIdentifier, ClassDefinition>,
}

impl StaticClassTable {
    /// 创建空的符号表
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记类定义，同一标识符后登记者覆盖
    pub fn insert(&mut self, definition: ClassDefinition) -> Option<ClassDefinition> {
        self.classes.insert(definition.id.clone(), definition)
    }

    /// 登记类定义
    pub fn with_class(mut self, definition: ClassDefinition) -> Self {
        self.insert(definition);
        self
    }
}

impl ClassTable for StaticClassTable {
    fn lookup(&self, id: &ClassIdentifier) -> Option<&ClassDefinition> {
        self.classes.get(id)
    }

    fn len(&self) -> usize {
        self.classes.len()
    }
}

impl FromIterator<ClassDefinition> for StaticClassTable {
    fn from_iter<I: IntoIterator<Item = ClassDefinition>>(iter: I) -> Self {
        let mut table = Self::new();
        for definition in iter {
            table.insert(definition);
        }
        table
    }
}

static NAMESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*namespace[ \t]+([A-Za-z_][A-Za-z0-9_\\]*)[ \t]*[;{]")
        .expect("invalid namespace pattern")
});

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:abstract|final|readonly)[ \t]+)*(class|interface|trait|enum)[ \t]+([A-Za-z_][A-Za-z0-9_]*)",
    )
    .expect("invalid declaration pattern")
});

static METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?:(?:public|protected|private|static|final|abstract)\s+)*)function\s+&?\s*([A-Za-z_][A-Za-z0-9_]*)\s*\(",
    )
    .expect("invalid method pattern")
});

/// 源码类索引器
#[derive(Debug, Clone, Default)]
pub struct SourceClassIndex {
    conventions: NamingConventions,
}

impl SourceClassIndex {
    /// 创建新的索引器
    pub fn new(conventions: NamingConventions) -> Self {
        Self { conventions }
    }

    /// 遍历全部模块，构建符号表
    ///
    /// 无法读取或不含类声明的文件被静默跳过；目录枚举失败仍然是致命错误。
    /// 同一个类在多个文件中声明时，优先保留路径能映射到该类名的文件。
    pub fn build(
        &self,
        modules: &[ModuleMetadata],
        scanner: &dyn SourceScanner,
    ) -> DiscoveryResult<StaticClassTable> {
        let mut table = StaticClassTable::new();
        let mut path_matched: HashSet<ClassIdentifier> = HashSet::new();

        for module in modules {
            for candidate in scanner.scan(module) {
                let candidate = candidate?;
                let path = candidate.absolute_path();
                let Some(definition) = self.index_file(&path) else {
                    continue;
                };

                let matches_path = self
                    .conventions
                    .class_identifier(candidate.relative(), &module.namespace_prefix)
                    == definition.id;

                if table.lookup(&definition.id).is_some() {
                    if !matches_path && path_matched.contains(&definition.id) {
                        warn!("类 {} 重复声明，忽略路径不匹配的文件: {}", definition.id, path.display());
                        continue;
                    }
                    warn!("类 {} 重复声明，改用: {}", definition.id, path.display());
                }
                if matches_path {
                    path_matched.insert(definition.id.clone());
                }

                debug!("登记类: {} ({})", definition.id, path.display());
                table.insert(definition);
            }
        }

        info!("类符号表构建完成，共 {} 个声明", table.len());
        Ok(table)
    }

    /// 索引单个源文件
    pub fn index_file(&self, path: &Path) -> Option<ClassDefinition> {
        match std::fs::read_to_string(path) {
            Ok(source) => {
                let definition = self.parse_source(&source);
                if definition.is_none() {
                    debug!("文件未声明类，忽略: {}", path.display());
                }
                definition
            }
            Err(e) => {
                debug!("无法读取源文件，忽略: {} ({})", path.display(), e);
                None
            }
        }
    }

    /// 从源码文本提取第一个类声明
    pub fn parse_source(&self, source: &str) -> Option<ClassDefinition> {
        let declaration = DECLARATION.captures(source)?;
        let whole = declaration.get(0)?;
        let kind = match &declaration[1] {
            "interface" => ClassKind::Interface,
            "trait" => ClassKind::Trait,
            "enum" => ClassKind::Enum,
            _ => ClassKind::Class,
        };

        let namespace = NAMESPACE
            .captures(&source[..whole.start()])
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str());

        let mut definition = ClassDefinition::new(
            self.conventions.qualify(namespace, &declaration[2]),
            kind,
        );
        definition.doc_comment = preceding_doc_comment(&source[..whole.start()]).map(str::to_string);
        definition.methods = METHOD
            .captures_iter(&class_members(&source[whole.end()..]))
            .map(|captures| method_signature(captures.get(1).map_or("", |m| m.as_str()), &captures[2]))
            .collect();

        Some(definition)
    }
}

/// 紧邻声明之前的 `/** ... */` 块，中间只允许空白和属性行
fn preceding_doc_comment(before: &str) -> Option<&str> {
    let mut text = before.trim_end();
    loop {
        let line_start = text.rfind('\n').map_or(0, |i| i + 1);
        if text[line_start..].trim_start().starts_with("#[") {
            text = text[..line_start].trim_end();
        } else {
            break;
        }
    }

    if !text.ends_with("*/") {
        return None;
    }
    let start = text.rfind("/**")?;
    let block = &text[start..];
    if block.len() < 5 || block[3..block.len() - 2].contains("*/") {
        return None;
    }
    Some(block)
}

/// 类体第一层的成员文本
///
/// 嵌套花括号内的代码、字符串、注释和 `#[...]` 属性组都被丢弃，
/// 类体结束后的内容不再读取。
fn class_members(after_declaration: &str) -> String {
    let bytes = after_declaration.as_bytes();
    let mut members = Vec::with_capacity(bytes.len());
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let skipped_to = match (bytes[i], bytes.get(i + 1).copied()) {
            (b'\'' | b'"', _) => Some(skip_string(bytes, i)),
            (b'/', Some(b'/')) => Some(skip_line(bytes, i)),
            (b'/', Some(b'*')) => Some(skip_block_comment(bytes, i)),
            (b'#', Some(b'[')) => Some(skip_attribute(bytes, i)),
            (b'#', _) => Some(skip_line(bytes, i)),
            _ => None,
        };
        if let Some(end) = skipped_to {
            if depth == 1 {
                members.push(b' ');
            }
            i = end;
            continue;
        }

        match (bytes[i], depth) {
            (b'{', _) => {
                depth += 1;
                if depth == 2 {
                    members.push(b' ');
                }
            }
            (b'}', 0) => {}
            (b'}', 1) => break,
            (b'}', _) => depth -= 1,
            (byte, 1) => members.push(byte),
            _ => {}
        }
        i += 1;
    }

    String::from_utf8_lossy(&members).into_owned()
}

/// `bytes[start]` 是引号，返回字符串结束后的偏移
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            byte if byte == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_line(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&byte| byte == b'\n')
        .map_or(bytes.len(), |offset| start + offset)
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start + 2..]
        .windows(2)
        .position(|window| window == b"*/")
        .map_or(bytes.len(), |offset| start + 2 + offset + 2)
}

/// `bytes[start..]` 以 `#[` 开头，返回配对的 `]` 之后的偏移
fn skip_attribute(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

fn method_signature(modifiers: &str, name: &str) -> MethodSignature {
    let visibility = if modifiers.contains("private") {
        Visibility::Private
    } else if modifiers.contains("protected") {
        Visibility::Protected
    } else {
        Visibility::Public
    };
    let role = if name.eq_ignore_ascii_case("__construct") {
        MethodRole::Constructor
    } else if name.eq_ignore_ascii_case("__destruct") {
        MethodRole::Destructor
    } else {
        MethodRole::Regular
    };

    MethodSignature {
        name: name.to_string(),
        visibility,
        role,
    }
}
