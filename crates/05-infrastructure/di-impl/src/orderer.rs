//! 描述符排序

use infrastructure_common::ServiceDescriptor;

/// 按优先级升序稳定排序
///
/// 优先级相同的描述符保持发现顺序。
pub fn order(mut descriptors: Vec<ServiceDescriptor>) -> Vec<ServiceDescriptor> {
    descriptors.sort_by_key(|descriptor| descriptor.priority);
    descriptors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_stable_by_priority() {
        let descriptors = vec![
            ServiceDescriptor::new("App\\First").with_priority(5),
            ServiceDescriptor::new("App\\Second").with_priority(1),
            ServiceDescriptor::new("App\\Third").with_priority(5),
            ServiceDescriptor::new("App\\Fourth").with_priority(3),
        ];

        let ordered = order(descriptors);

        let priorities: Vec<i32> = ordered.iter().map(|d| d.priority).collect();
        assert_eq!(priorities, vec![1, 3, 5, 5]);

        let classes: Vec<&str> = ordered.iter().map(|d| d.class_id.as_str()).collect();
        assert_eq!(classes, vec!["App\\Second", "App\\Fourth", "App\\First", "App\\Third"]);
    }

    #[test]
    fn test_extreme_priorities() {
        let ordered = order(vec![
            ServiceDescriptor::new("App\\Max").with_priority(i32::MAX),
            ServiceDescriptor::new("App\\Min").with_priority(i32::MIN),
            ServiceDescriptor::new("App\\Zero"),
        ]);

        let priorities: Vec<i32> = ordered.iter().map(|d| d.priority).collect();
        assert_eq!(priorities, vec![i32::MIN, 0, i32::MAX]);
    }
}
