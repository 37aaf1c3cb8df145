use crate::model::AnnotationGroup;

/// First write stores `incoming` as-is; later writes append its annotations
/// to the end of `existing`. Repeated annotations are kept.
pub fn merge(existing: Option<AnnotationGroup>, incoming: &AnnotationGroup) -> AnnotationGroup {
    match existing {
        None => incoming.clone(),
        Some(mut group) => {
            group.annotations.extend(incoming.annotations.iter().cloned());
            group
        }
    }
}
