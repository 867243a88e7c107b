//! 指令发射

use di_abstractions::ContainerBuilder;
use infrastructure_common::{ConstructionDirective, DiscoveryResult, ServiceDescriptor};
use tracing::debug;

/// 把有序描述符逐个转换为构造指令并交给构建器
///
/// 返回已发射的指令数量。构建器拒绝定义时立即停止。
pub fn emit<B>(descriptors: Vec<ServiceDescriptor>, builder: &mut B) -> DiscoveryResult<usize>
where
    B: ContainerBuilder + ?Sized,
{
    let mut emitted = 0;
    for descriptor in descriptors {
        let directive = ConstructionDirective::from(descriptor);
        debug!(
            "发射指令: {} ({}), 引用: {:?}",
            directive.id,
            directive.class,
            directive.arguments.references()
        );
        builder.define(directive)?;
        emitted += 1;
    }
    Ok(emitted)
}
