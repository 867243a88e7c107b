//! 服务发现流水线的集成测试

use di_impl::{DiscoveryPipeline, DocBlockParser, InMemoryContainerBuilder};
use infrastructure_common::{
    ArgumentTree, DiscoveryConfig, DiscoveryError, ModuleMetadata, ValidationError,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_source(root: &Path, relative: &str, source: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, source).unwrap();
}

fn config(environment: &str, modules: Vec<ModuleMetadata>) -> DiscoveryConfig {
    DiscoveryConfig {
        modules,
        ..DiscoveryConfig::default().with_environment(environment)
    }
}

fn run(config: &DiscoveryConfig) -> Result<InMemoryContainerBuilder, DiscoveryError> {
    let pipeline = DiscoveryPipeline::from_config(config, Box::new(DocBlockParser::new()), None)?;
    let mut builder = InMemoryContainerBuilder::new();
    pipeline.run(&config.modules, &mut builder)?;
    Ok(builder)
}

const PROD_ONLY: &str = r#"<?php

namespace App\Metrics;

/**
 * @Service({"envs": ["prod"]})
 */
class Exporter
{
    public function export(): void {}
}
"#;

#[test]
fn test_environment_gate() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), "Exporter.php", PROD_ONLY);
    let modules = vec![ModuleMetadata::new(dir.path(), "App\\Metrics")];

    let dev = run(&config("dev", modules.clone())).unwrap();
    assert!(dev.is_empty());

    let prod = run(&config("prod", modules)).unwrap();
    assert_eq!(prod.len(), 1);
    let directive = prod.directives().next().unwrap();
    assert_eq!(directive.id, "App\\Metrics\\Exporter");
    assert_eq!(directive.class.as_str(), "App\\Metrics\\Exporter");
}

#[test]
fn test_single_method_violation_aborts_run() {
    let dir = TempDir::new().unwrap();
    write_source(
        dir.path(),
        "Handler/Aaa.php",
        "<?php\nnamespace App\\Handler;\n/** @Service */\nclass Aaa {}\n",
    );
    write_source(
        dir.path(),
        "Handler/Command.php",
        r#"<?php
namespace App\Handler;

/**
 * @Service({"singleMethodConstraint": true})
 */
class Command
{
    public function __construct() {}
    public function handle() {}
    public function undo() {}
}
"#,
    );

    let modules = vec![ModuleMetadata::new(dir.path(), "App")];
    let pipeline =
        DiscoveryPipeline::from_config(&config("dev", modules.clone()), Box::new(DocBlockParser::new()), None)
            .unwrap();
    let mut builder = InMemoryContainerBuilder::new();

    let error = pipeline.run(&modules, &mut builder).unwrap_err();

    match &error {
        DiscoveryError::ValidationError {
            source: ValidationError::SingleMethodViolation { class, methods },
        } => {
            assert_eq!(class, "App\\Handler\\Command");
            assert_eq!(methods, &vec!["handle".to_string(), "undo".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(error.to_string().contains("App\\Handler\\Command"));
    assert!(builder.is_empty());
}

#[test]
fn test_single_method_check_counts_only_class_members() {
    let dir = TempDir::new().unwrap();
    write_source(
        dir.path(),
        "Handler/Invokable.php",
        r#"<?php
namespace App\Handler;

/** @Service({"id": "invokable", "singleMethodConstraint": true}) */
class Invokable
{
    public function __invoke(): object
    {
        return new class {
            public function first() {}
            public function second() {}
        };
    }
}
"#,
    );
    write_source(
        dir.path(),
        "Handler/Compact.php",
        "<?php\nnamespace App\\Handler;\n/** @Service({\"singleMethodConstraint\": true}) */\nclass Compact { #[Required] public function a() {} public function b() {} }\n",
    );
    let modules = vec![ModuleMetadata::new(dir.path(), "App")];

    let error = run(&config("dev", modules.clone())).unwrap_err();
    match &error {
        DiscoveryError::ValidationError {
            source: ValidationError::SingleMethodViolation { class, methods },
        } => {
            assert_eq!(class, "App\\Handler\\Compact");
            assert_eq!(methods, &vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }

    fs::remove_file(dir.path().join("Handler/Compact.php")).unwrap();
    let builder = run(&config("dev", modules)).unwrap();
    assert_eq!(builder.get("invokable").unwrap().class.as_str(), "App\\Handler\\Invokable");
}

#[test]
fn test_vendor_and_excluded_paths_contribute_nothing() {
    let dir = TempDir::new().unwrap();
    let service = "<?php\nnamespace Vendor;\n/** @Service */\nclass Client {}\n";
    write_source(dir.path(), "vendor/acme/Client.php", service);
    write_source(
        dir.path(),
        "src/Tests/Client.php",
        "<?php\nnamespace App\\Tests;\n/** @Service */\nclass Client {}\n",
    );

    let modules = vec![
        ModuleMetadata::new(dir.path().join("vendor/acme"), "Vendor"),
        ModuleMetadata::new(dir.path().join("src"), "App"),
    ];
    let pipeline =
        DiscoveryPipeline::from_config(&config("dev", modules.clone()), Box::new(DocBlockParser::new()), None)
            .unwrap();
    let mut builder = InMemoryContainerBuilder::new();
    let stats = pipeline.run(&modules, &mut builder).unwrap();

    assert!(builder.is_empty());
    assert_eq!(stats.modules_vendored, 1);
    assert_eq!(stats.modules_scanned, 1);
    assert_eq!(stats.candidate_files, 0);
}

#[test]
fn test_non_class_and_undocumented_sources_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), "routes.php", "<?php\nreturn ['home' => '/'];\n");
    write_source(dir.path(), "Plain.php", "<?php\nnamespace App;\nclass Plain {}\n");
    write_source(
        dir.path(),
        "Contract.php",
        "<?php\nnamespace App;\n/** @Service */\ninterface Contract {}\n",
    );
    write_source(
        dir.path(),
        "Misplaced.php",
        "<?php\nnamespace Other;\n/** @Service */\nclass Misplaced {}\n",
    );

    let modules = vec![ModuleMetadata::new(dir.path(), "App")];
    let pipeline =
        DiscoveryPipeline::from_config(&config("dev", modules.clone()), Box::new(DocBlockParser::new()), None)
            .unwrap();
    let mut builder = InMemoryContainerBuilder::new();
    let stats = pipeline.run(&modules, &mut builder).unwrap();

    assert!(builder.is_empty());
    assert_eq!(stats.candidate_files, 4);
    assert_eq!(stats.unresolved_classes, 3);
    assert_eq!(stats.undocumented_classes, 1);
}

#[test]
fn test_priority_order_and_resolved_arguments() {
    let dir = TempDir::new().unwrap();
    write_source(
        dir.path(),
        "Alpha.php",
        r#"<?php
namespace App;
/** @Service({"priority": 10, "arguments": {"handlers": "!tagged app.handler", "logger": "@logger"}}) */
class Alpha {}
"#,
    );
    write_source(
        dir.path(),
        "Beta.php",
        "<?php\nnamespace App;\n/** @Service({\"id\": \"logger\", \"priority\": -1}) */\nclass Beta {}\n",
    );
    write_source(
        dir.path(),
        "Gamma.php",
        "<?php\nnamespace App;\n/** @Service({\"priority\": 10, \"tags\": [\"app.handler\"]}) */\nclass Gamma {}\n",
    );

    let modules = vec![ModuleMetadata::new(dir.path(), "App")];
    let builder = run(&config("dev", modules)).unwrap();

    let ids: Vec<&str> = builder.directives().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["logger", "App\\Alpha", "App\\Gamma"]);

    let ArgumentTree::Map(arguments) = &builder.get("App\\Alpha").unwrap().arguments else {
        panic!("expected map arguments");
    };
    assert_eq!(
        arguments.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["handlers", "logger"]
    );
    assert_eq!(arguments["handlers"], ArgumentTree::tagged("app.handler"));
    assert_eq!(arguments["logger"], ArgumentTree::reference("logger"));
}

#[test]
fn test_malformed_doc_block_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_source(
        dir.path(),
        "Broken.php",
        "<?php\nnamespace App;\n/** @Service({\"id\": }) */\nclass Broken {}\n",
    );

    let modules = vec![ModuleMetadata::new(dir.path(), "App")];
    let error = run(&config("dev", modules)).unwrap_err();

    assert!(matches!(error, DiscoveryError::MetadataError { .. }));
    assert!(error.to_string().contains("App\\Broken"));
}
