//! # 服务发现命令行工具
//!
//! 扫描模块源码树，把构造指令输出为 JSON 或摘要文本

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use di_abstractions::DiscoveryStats;
use infrastructure_common::ConstructionDirective;
use infrastructure_composition::DiscoveryBuilder;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "service-discovery")]
#[command(about = "Lorn ADSP 构建期服务发现")]
struct Args {
    /// 配置文件路径（TOML 或 JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 当前环境，覆盖配置文件
    #[arg(short, long)]
    env: Option<String>,

    /// 追加模块，格式为 `<path>=<namespace>`，可重复
    #[arg(short, long = "module", value_parser = parse_module)]
    modules: Vec<(PathBuf, String)>,

    /// 输出文件，默认标准输出
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// 按发射顺序排列的指令数组
    Json,
    /// 每条指令一行，末尾附统计
    Summary,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志，RUST_LOG 优先
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut builder = DiscoveryBuilder::new();
    if let Some(path) = &args.config {
        builder = builder
            .load_config(path)
            .with_context(|| format!("无法加载配置文件: {}", path.display()))?;
    }
    if let Some(env) = &args.env {
        builder = builder.environment(env.as_str());
    }
    for (path, namespace) in &args.modules {
        builder = builder.add_module(path, namespace.as_str());
    }

    if builder.config().modules.is_empty() {
        bail!("没有可扫描的模块，请通过 --config 或 --module 指定");
    }

    let runner = builder.build().context("服务发现流水线构建失败")?;
    let (directives, stats) = runner.collect_directives().context("服务发现失败")?;
    let rendered = render(args.format, &directives, &stats)?;

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("无法写入输出文件: {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("无法写入标准输出")?,
    }

    info!("完成: {} 条指令", stats.directives_emitted);
    Ok(())
}

fn parse_module(value: &str) -> Result<(PathBuf, String), String> {
    match value.split_once('=') {
        Some((path, namespace)) if !path.is_empty() => {
            Ok((PathBuf::from(path), namespace.to_string()))
        }
        _ => Err(format!("模块格式应为 <path>=<namespace>: {value}")),
    }
}

fn render(
    format: OutputFormat,
    directives: &[ConstructionDirective],
    stats: &DiscoveryStats,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(directives)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Summary => {
            let mut out = String::new();
            for directive in directives {
                writeln!(out, "{} {}", directive.id, directive.class)?;
            }
            writeln!(
                out,
                "modules: {} (vendor skipped: {}), candidates: {}, directives: {}, skipped: {}",
                stats.modules_scanned,
                stats.modules_vendored,
                stats.candidate_files,
                stats.directives_emitted,
                stats.skipped()
            )?;
            Ok(out)
        }
    }
}
