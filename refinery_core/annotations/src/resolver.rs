use crate::config::{AnnotationSource, AnnotationStepConfig};
use crate::error::AnnotationError;
use crate::model::AnnotationGroup;
use crate::store::AnnotationStore;
use log::debug;

/// Effective annotation group of a step: the inline group, or the named
/// group read from `store`.
pub fn resolve(
    config: &AnnotationStepConfig,
    store: &dyn AnnotationStore,
) -> Result<AnnotationGroup, AnnotationError> {
    match &config.annotations {
        AnnotationSource::Inline(group) => Ok(group.clone()),
        AnnotationSource::Shared { name } => {
            debug!(
                "step '{}' reading annotation group '{}' from store",
                config.step_name, name
            );
            store
                .read_group(name)?
                .ok_or_else(|| AnnotationError::missing_group(name.as_str()))
        }
    }
}
