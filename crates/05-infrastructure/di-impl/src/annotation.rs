//! 文档注释块解析器
//!
//! 注解以行首的 `@Name` 开始，名称后可以跟一个括号包围的 JSON 载荷：
//!
//! ```text
//! /**
//!  * @Service({"id": "mailer", "arguments": ["@logger"]})
//!  */
//! ```

use di_abstractions::{MetadataParser, RawAnnotation};
use infrastructure_common::{ClassIdentifier, MetadataError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static ANNOTATION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@([A-Za-z_][A-Za-z0-9_\\]*)")
        .expect("invalid annotation pattern")
});

/// 默认的文档注释块解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct DocBlockParser;

impl DocBlockParser {
    /// 创建新的解析器
    pub fn new() -> Self {
        Self
    }
}

impl MetadataParser for DocBlockParser {
    fn parse(
        &self,
        class: &ClassIdentifier,
        doc_comment: &str,
    ) -> Result<Vec<RawAnnotation>, MetadataError> {
        let text = strip_decoration(doc_comment);
        let mut annotations = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let line_end = text[pos..].find('\n').map_or(text.len(), |i| pos + i);
            let line = &text[pos..line_end];
            let trimmed = line.trim_start();

            let Some(captures) = ANNOTATION_NAME.captures(trimmed) else {
                pos = line_end + 1;
                continue;
            };

            let name = captures[1].to_string();
            let name_end = pos + (line.len() - trimmed.len()) + captures[0].len();
            let rest = &text[name_end..line_end];
            let gap = rest.len() - rest.trim_start().len();

            if !rest[gap..].starts_with('(') {
                annotations.push(RawAnnotation::new(name, Value::Null));
                pos = line_end + 1;
                continue;
            }

            let open = name_end + gap;
            let close = find_closing(&text[open..])
                .map(|offset| open + offset)
                .ok_or_else(|| MetadataError::syntax(class.as_str(), format!("@{name} 的括号未闭合")))?;

            let body = text[open + 1..close].trim();
            let payload = if body.is_empty() {
                Value::Null
            } else {
                serde_json::from_str(body).map_err(|e| {
                    MetadataError::syntax(class.as_str(), format!("@{name} 的载荷不是合法 JSON: {e}"))
                })?
            };
            annotations.push(RawAnnotation::new(name, payload));

            pos = text[close..].find('\n').map_or(text.len(), |i| close + i + 1);
        }

        Ok(annotations)
    }

    fn name(&self) -> &str {
        "DocBlockParser"
    }
}

/// 去掉 `/**`、`*/` 和每行开头的 `*`
fn strip_decoration(doc_comment: &str) -> String {
    let inner = doc_comment.trim();
    let inner = inner.strip_prefix("/**").unwrap_or(inner);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    inner
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix('*').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `text` 以 `(` 开头，返回与之配对的 `)` 的字节偏移
///
/// 字符串字面量内的括号不参与计数。
fn find_closing(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }

    None
}
