//! 服务发现运行器

use di_abstractions::{ContainerBuilder, DiscoveryStats};
use di_impl::{DiscoveryPipeline, InMemoryContainerBuilder};
use infrastructure_common::{ConstructionDirective, DiscoveryConfig, DiscoveryResult};

/// 组装完成、可以运行的服务发现流水线
#[derive(Debug)]
pub struct DiscoveryRunner {
    config: DiscoveryConfig,
    pipeline: DiscoveryPipeline,
}

impl DiscoveryRunner {
    pub(crate) fn new(config: DiscoveryConfig, pipeline: DiscoveryPipeline) -> Self {
        Self { config, pipeline }
    }

    /// 生效的配置
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// 对配置中的全部模块运行一次流水线
    pub fn run(&self, builder: &mut dyn ContainerBuilder) -> DiscoveryResult<DiscoveryStats> {
        self.pipeline.run(&self.config.modules, builder)
    }

    /// 运行并收集全部指令
    pub fn collect_directives(&self) -> DiscoveryResult<(Vec<ConstructionDirective>, DiscoveryStats)> {
        let mut container = InMemoryContainerBuilder::new();
        let stats = self.run(&mut container)?;
        Ok((container.into_directives(), stats))
    }
}
