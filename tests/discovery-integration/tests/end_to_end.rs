//! 服务发现端到端测试：配置文件 → 组合层 → 流水线 → 容器构建器

use anyhow::Result;
use di_abstractions::{ContainerBuilder, MetadataParser, RawAnnotation};
use di_impl::InMemoryContainerBuilder;
use infrastructure_common::{
    ClassIdentifier, ConstructionDirective, DependencyError, DiscoveryError, MetadataError,
};
use infrastructure_composition::DiscoveryBuilder;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_source(root: &Path, relative: &str, source: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, source).unwrap();
}

/// 一个包含两个模块和一个第三方模块的应用
fn application(root: &Path) {
    write_source(
        root,
        "src/Mailer/Transport/Smtp.php",
        r#"<?php
namespace App\Mailer\Transport;

/**
 * SMTP 传输。
 *
 * @Service({
 *   "id": "mailer.transport",
 *   "tags": [{"name": "mailer.transport", "alias": "smtp"}],
 *   "arguments": {"host": "localhost", "port": 25}
 * })
 */
final class Smtp
{
    public function __construct(string $host, int $port) {}
    public function send(string $message): void {}
}
"#,
    );
    write_source(
        root,
        "src/Mailer/Mailer.php",
        r#"<?php
namespace App\Mailer;

/**
 * @Service({
 *   "id": "mailer",
 *   "public": true,
 *   "priority": 5,
 *   "arguments": ["@mailer.transport", "!tagged mailer.listener"],
 *   "methodCalls": [{"method": "setLogger", "arguments": ["@logger"]}]
 * })
 */
class Mailer
{
    public function send(string $to): void {}
}
"#,
    );
    write_source(
        root,
        "src/Mailer/TracingMailer.php",
        r#"<?php
namespace App\Mailer;

/** @Service({"decorates": "mailer", "priority": 10, "arguments": ["@.inner"], "envs": ["dev"]}) */
class TracingMailer {}
"#,
    );
    write_source(
        root,
        "src/Mailer/Tests/MailerTest.php",
        "<?php\nnamespace App\\Mailer\\Tests;\n/** @Service */\nclass MailerTest {}\n",
    );
    write_source(
        root,
        "lib/Logging/Logger.php",
        r#"<?php
namespace Lib\Logging;

/**
 * @Service({
 *   "id": "logger",
 *   "priority": -10,
 *   "factory": ["@logger.factory", "create"]
 * })
 */
class Logger {}
"#,
    );
    write_source(
        root,
        "vendor/acme/Client.php",
        "<?php\nnamespace Acme;\n/** @Service */\nclass Client {}\n",
    );
    write_source(
        root,
        "discovery.toml",
        r#"
environment = "prod"

[[modules]]
path = "src/Mailer"
namespace = "App\\Mailer"

[[modules]]
path = "lib"
namespace = "Lib"

[[modules]]
path = "vendor/acme"
namespace = "Acme"
"#,
    );
}

#[test]
fn test_config_file_drives_full_run() -> Result<()> {
    let dir = TempDir::new()?;
    application(dir.path());

    let runner = DiscoveryBuilder::new()
        .load_config(dir.path().join("discovery.toml"))?
        .build()?;
    let (directives, stats) = runner.collect_directives()?;

    let ids: Vec<&str> = directives.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["logger", "mailer.transport", "mailer"]);

    assert_eq!(stats.modules_scanned, 2);
    assert_eq!(stats.modules_vendored, 1);
    assert_eq!(stats.candidate_files, 4);
    assert_eq!(stats.environment_excluded, 1);
    assert_eq!(stats.directives_emitted, 3);

    let output = serde_json::to_value(&directives)?;
    assert_eq!(
        output[0]["factory"],
        json!({"type": "list", "value": [
            {"type": "reference", "value": "logger.factory"},
            {"type": "literal", "value": "create"}
        ]})
    );
    assert_eq!(output[1]["class"], "App\\Mailer\\Transport\\Smtp");
    assert_eq!(
        output[1]["tags"],
        json!([{"name": "mailer.transport", "attributes": {"alias": "smtp"}}])
    );
    assert_eq!(
        output[1]["arguments"],
        json!({"type": "map", "value": {
            "host": {"type": "literal", "value": "localhost"},
            "port": {"type": "literal", "value": 25}
        }})
    );
    assert_eq!(output[2]["public"], true);
    assert_eq!(output[2]["lazy"], false);
    assert_eq!(
        output[2]["arguments"]["value"],
        json!([
            {"type": "reference", "value": "mailer.transport"},
            {"type": "tagged_group_reference", "value": "mailer.listener"}
        ])
    );
    assert_eq!(
        output[2]["method_calls"],
        json!([{"method": "setLogger", "arguments": ["@logger"]}])
    );
    assert!(output[2].get("factory").is_none());
    Ok(())
}

#[test]
fn test_environment_override_admits_decorator() -> Result<()> {
    let dir = TempDir::new()?;
    application(dir.path());

    let runner = DiscoveryBuilder::new()
        .load_config(dir.path().join("discovery.toml"))?
        .environment("dev")
        .build()?;
    let (directives, _) = runner.collect_directives()?;

    let last = directives.last().unwrap();
    assert_eq!(last.id, "App\\Mailer\\TracingMailer");
    assert_eq!(last.decorates.as_deref(), Some("mailer"));
    assert_eq!(
        serde_json::to_value(&last.arguments)?,
        json!({"type": "list", "value": [{"type": "reference", "value": ".inner"}]})
    );
    Ok(())
}

/// 把包含 `#service` 的注释块视为 Service 注解
struct HashtagParser;

impl MetadataParser for HashtagParser {
    fn parse(
        &self,
        class: &ClassIdentifier,
        doc_comment: &str,
    ) -> Result<Vec<RawAnnotation>, MetadataError> {
        if doc_comment.contains("#broken") {
            return Err(MetadataError::syntax(class.as_str(), "broken marker"));
        }
        Ok(doc_comment
            .contains("#service")
            .then(|| RawAnnotation::new("Service", Value::Null))
            .into_iter()
            .collect())
    }

    fn name(&self) -> &str {
        "HashtagParser"
    }
}

#[test]
fn test_custom_metadata_parser() -> Result<()> {
    let dir = TempDir::new()?;
    write_source(dir.path(), "Clock.php", "<?php\nnamespace App;\n/** #service */\nclass Clock {}\n");
    write_source(dir.path(), "Other.php", "<?php\nnamespace App;\n/** @Service */\nclass Other {}\n");

    let runner = DiscoveryBuilder::new()
        .add_module(dir.path(), "App")
        .with_parser(Box::new(HashtagParser))
        .build()?;
    let (directives, stats) = runner.collect_directives()?;

    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].id, "App\\Clock");
    assert_eq!(stats.non_service_classes, 1);

    write_source(dir.path(), "Broken.php", "<?php\nnamespace App;\n/** #broken */\nclass Broken {}\n");
    let runner = DiscoveryBuilder::new()
        .add_module(dir.path(), "App")
        .with_parser(Box::new(HashtagParser))
        .build()?;
    let error = runner.collect_directives().unwrap_err();
    assert!(matches!(error, DiscoveryError::MetadataError { .. }));
    assert!(error.to_string().contains("App\\Broken"));
    Ok(())
}

/// 只接受有限数量定义的构建器
struct BoundedBuilder {
    limit: usize,
    defined: Vec<ConstructionDirective>,
}

impl ContainerBuilder for BoundedBuilder {
    fn define(&mut self, directive: ConstructionDirective) -> Result<(), DependencyError> {
        if self.defined.len() == self.limit {
            return Err(DependencyError::RegistrationError {
                id: directive.id,
                message: "container is full".to_string(),
            });
        }
        self.defined.push(directive);
        Ok(())
    }
}

#[test]
fn test_builder_refusal_surfaces_as_error() -> Result<()> {
    let dir = TempDir::new()?;
    application(dir.path());

    let runner = DiscoveryBuilder::new()
        .load_config(dir.path().join("discovery.toml"))?
        .build()?;

    let mut builder = BoundedBuilder {
        limit: 1,
        defined: Vec::new(),
    };
    let error = runner.run(&mut builder).unwrap_err();

    assert!(matches!(error, DiscoveryError::DependencyError { .. }));
    assert!(error.to_string().contains("mailer.transport"));
    assert_eq!(builder.defined[0].id, "logger");
    Ok(())
}

#[test]
fn test_equal_priorities_follow_module_order() -> Result<()> {
    let dir = TempDir::new()?;
    let service = |namespace: &str, class: &str| {
        format!("<?php\nnamespace {namespace};\n/** @Service */\nclass {class} {{}}\n")
    };
    write_source(dir.path(), "second/Zeta.php", &service("Second", "Zeta"));
    write_source(dir.path(), "first/Beta.php", &service("First", "Beta"));
    write_source(dir.path(), "first/Alpha.php", &service("First", "Alpha"));

    let runner = DiscoveryBuilder::new()
        .add_module(dir.path().join("second"), "Second")
        .add_module(dir.path().join("first"), "First")
        .build()?;

    let mut container = InMemoryContainerBuilder::new();
    runner.run(&mut container)?;

    let ids: Vec<&str> = container.directives().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["Second\\Zeta", "First\\Alpha", "First\\Beta"]);
    Ok(())
}

#[test]
fn test_configuration_errors_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("discovery.toml");
    fs::write(&path, "environment = \"\"\n[scan]\nfile_patterns = [\"{\"]\n").unwrap();

    match DiscoveryBuilder::new().load_config(&path) {
        Err(DiscoveryError::ConfigError { source }) => {
            assert!(source.to_string().contains("environment"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("invalid configuration accepted"),
    }
}
