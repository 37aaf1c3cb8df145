use crate::config::AnnotationStepConfig;
use crate::error::AnnotationError;
use crate::graph::StepGraph;
use crate::model::{AnnotationGroup, ModelAnnotation};
use common::types::RowSchema;

/// Unless the step describes a shared dimension, its target output step must
/// name an existing step of `graph`.
pub fn validate_target_step(
    config: &AnnotationStepConfig,
    graph: &dyn StepGraph,
) -> Result<(), AnnotationError> {
    if config.shared_dimension {
        return Ok(());
    }
    match config.target_output_step.as_deref() {
        Some(step) if !step.trim().is_empty() && graph.find_step(step) => Ok(()),
        _ => Err(AnnotationError::invalid_output_step()),
    }
}

/// Check every annotation of `group` against the incoming row layout.
pub fn validate(group: &AnnotationGroup, schema: &RowSchema) -> Result<(), AnnotationError> {
    for annotation in group {
        let field = annotation.field();
        let meta = schema.search_value_meta(field).ok_or_else(|| {
            AnnotationError::validation(format!(
                "Field '{}' used by {} annotation '{}' is not present in the incoming rows",
                field,
                annotation.kind(),
                annotation.name()
            ))
        })?;

        if let ModelAnnotation::CreateMeasure(measure) = annotation {
            if !measure.aggregation.is_count() && !meta.value_type.is_numeric() {
                return Err(AnnotationError::validation(format!(
                    "Measure '{}' uses {} aggregation, which requires a numeric field, but '{}' is {}",
                    measure.name, measure.aggregation, field, meta.value_type
                )));
            }
        }
    }
    Ok(())
}
