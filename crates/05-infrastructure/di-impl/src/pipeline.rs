//! 服务发现流水线
//!
//! 扫描 → 解析类 → 构建描述符 → 参数解析 → 排序 → 发射。所有致命检查都在发射之前完成，
//! 因此失败的运行不会向构建器提交任何指令。

use crate::argument_resolver::ArgumentResolver;
use crate::class_resolver::ClassResolver;
use crate::class_table::SourceClassIndex;
use crate::descriptor_builder::{BuildOutcome, DescriptorBuilder};
use crate::emitter::emit;
use crate::orderer::order;
use crate::scanner::FileScanner;
use di_abstractions::{ClassTable, ContainerBuilder, DiscoveryStats, MetadataParser, SourceScanner};
use infrastructure_common::{
    ClassIdentifier, DiscoveryConfig, DiscoveryResult, ModuleMetadata, NamingConventions,
    ServiceDescriptor,
};
use std::collections::HashSet;
use tracing::{debug, info};

/// 服务发现流水线
pub struct DiscoveryPipeline {
    scanner: Box<dyn SourceScanner>,
    resolver: ClassResolver,
    descriptors: DescriptorBuilder,
    arguments: ArgumentResolver,
}

impl DiscoveryPipeline {
    /// 由各阶段组装流水线
    pub fn new(
        scanner: Box<dyn SourceScanner>,
        resolver: ClassResolver,
        descriptors: DescriptorBuilder,
    ) -> Self {
        Self {
            scanner,
            resolver,
            descriptors,
            arguments: ArgumentResolver::new(),
        }
    }

    /// 按配置组装流水线
    ///
    /// 未提供符号表时，用同一套扫描规则索引配置中的全部模块。
    pub fn from_config(
        config: &DiscoveryConfig,
        parser: Box<dyn MetadataParser>,
        table: Option<Box<dyn ClassTable>>,
    ) -> DiscoveryResult<Self> {
        let scanner = FileScanner::new(config.scan.clone())?;
        let conventions = NamingConventions::new(config.resolver.namespace_separator.as_str());

        let table: Box<dyn ClassTable> = match table {
            Some(table) => table,
            None => Box::new(
                SourceClassIndex::new(conventions.clone()).build(&config.modules, &scanner)?,
            ),
        };

        Ok(Self::new(
            Box::new(scanner),
            ClassResolver::new(conventions, table),
            DescriptorBuilder::new(parser, config.environment.as_str()),
        ))
    }

    /// 当前环境
    pub fn environment(&self) -> &str {
        self.descriptors.environment()
    }

    /// 按发现顺序收集通过环境过滤的描述符
    pub fn collect(
        &self,
        modules: &[ModuleMetadata],
        stats: &mut DiscoveryStats,
    ) -> DiscoveryResult<Vec<ServiceDescriptor>> {
        let mut collected = Vec::new();
        let mut seen: HashSet<ClassIdentifier> = HashSet::new();

        for module in modules {
            if self.scanner.skips(module) {
                debug!("跳过第三方模块: {}", module.path.display());
                stats.modules_vendored += 1;
                continue;
            }

            debug!(
                "扫描模块: {} ({})",
                module.path.display(),
                module.namespace_prefix
            );
            stats.modules_scanned += 1;

            for candidate in self.scanner.scan(module) {
                let candidate = candidate?;
                stats.candidate_files += 1;

                let id = self
                    .resolver
                    .resolve(candidate.relative(), &module.namespace_prefix);
                let Some(definition) = self.resolver.definition(&id) else {
                    debug!("未找到可加载的类，跳过: {}", id);
                    stats.unresolved_classes += 1;
                    continue;
                };

                if !seen.insert(id.clone()) {
                    debug!("类已由先前的模块处理，跳过: {}", id);
                    continue;
                }

                match self.descriptors.build(definition)? {
                    BuildOutcome::Registered(descriptor) => collected.push(descriptor),
                    BuildOutcome::Undocumented => {
                        debug!("类没有文档注释块，跳过: {}", id);
                        stats.undocumented_classes += 1;
                    }
                    BuildOutcome::NotService => {
                        debug!("类没有 Service 注解，跳过: {}", id);
                        stats.non_service_classes += 1;
                    }
                    BuildOutcome::EnvironmentExcluded => stats.environment_excluded += 1,
                }
            }
        }

        Ok(collected)
    }

    /// 运行完整流水线，把指令交给构建器
    pub fn run<B>(&self, modules: &[ModuleMetadata], builder: &mut B) -> DiscoveryResult<DiscoveryStats>
    where
        B: ContainerBuilder + ?Sized,
    {
        info!(
            "开始服务发现: {} 个模块, 环境 {}, 扫描器 {}",
            modules.len(),
            self.environment(),
            self.scanner.name()
        );

        let mut stats = DiscoveryStats::default();
        let descriptors = self.collect(modules, &mut stats)?;

        let resolved = descriptors
            .into_iter()
            .map(|descriptor| self.arguments.resolve_descriptor(descriptor))
            .collect();
        let ordered = order(resolved);

        stats.directives_emitted = emit(ordered, builder)?;

        info!(
            "服务发现完成: 扫描 {} 个模块 (跳过第三方 {}), 候选文件 {}, 发射指令 {}, 跳过 {}",
            stats.modules_scanned,
            stats.modules_vendored,
            stats.candidate_files,
            stats.directives_emitted,
            stats.skipped()
        );
        Ok(stats)
    }
}

impl std::fmt::Debug for DiscoveryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryPipeline")
            .field("scanner", &self.scanner.name())
            .field("resolver", &self.resolver)
            .field("descriptors", &self.descriptors)
            .finish()
    }
}
