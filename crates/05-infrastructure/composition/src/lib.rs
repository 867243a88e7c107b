//! # 基础设施组合层
//!
//! 把配置加载、日志初始化、类符号表构建和服务发现流水线组合成一次运行。
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use di_impl::InMemoryContainerBuilder;
//! use infrastructure_composition::DiscoveryBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = DiscoveryBuilder::new()
//!         .load_config("discovery.toml")?
//!         .environment("prod")
//!         .build()?;
//!
//!     let mut container = InMemoryContainerBuilder::new();
//!     let stats = runner.run(&mut container)?;
//!     println!("发射 {} 条指令", stats.directives_emitted);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod runner;

pub use builder::{DiscoveryBuilder, LoggingConfig};
pub use runner::DiscoveryRunner;
