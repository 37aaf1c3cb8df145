use crate::config::AnnotationStepConfig;
use crate::error::AnnotationError;
use crate::extension::ExtensionDataMap;
use crate::graph::TransformationGraph;
use crate::model::AnnotationGroup;
use crate::step::{ModelAnnotationStep, RunState, StepContext};
use crate::store::AnnotationStore;
use common::config::loader::load_yaml;
use common::types::{Row, RowSchema};
use log::info;
use serde::Deserialize;
use std::path::Path;

/// One run of a transformation: its steps, the input row layout, optional
/// input rows and the annotation steps applied to them in order.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformationDefinition {
    pub name: String,
    /// Non annotation steps of the graph, e.g. the data provider step.
    #[serde(default)]
    pub steps: Vec<String>,
    pub row_schema: RowSchema,
    #[serde(default)]
    pub rows: Vec<Row>,
    pub annotation_steps: Vec<AnnotationStepConfig>,
}

impl TransformationDefinition {
    pub fn load(path: &Path) -> Result<Self, AnnotationError> {
        Ok(load_yaml(path)?)
    }

    pub fn graph(&self) -> TransformationGraph {
        let mut graph = TransformationGraph::new(self.steps.iter().cloned());
        for step in &self.annotation_steps {
            graph.add_step(step.step_name.clone());
        }
        graph
    }
}

#[derive(Debug, Clone)]
pub struct TransformationResult {
    pub annotations: Option<AnnotationGroup>,
    pub rows: Vec<Row>,
}

/// Execute every annotation step over the rows with a fresh job scoped
/// extension map. Stops at the first failing step.
pub fn run_transformation(
    definition: &TransformationDefinition,
    store: &dyn AnnotationStore,
) -> Result<TransformationResult, AnnotationError> {
    let graph = definition.graph();
    let extension_map = ExtensionDataMap::new();
    let ctx = StepContext {
        store,
        graph: &graph,
        extension_map: &extension_map,
    };

    let mut rows = definition.rows.clone();
    for config in &definition.annotation_steps {
        let step = ModelAnnotationStep::new(config, ctx);
        let mut state = RunState::new();
        rows = step.run(&mut state, &definition.row_schema, rows)?;
    }

    info!(
        "transformation '{}' forwarded {} row(s)",
        definition.name,
        rows.len()
    );
    Ok(TransformationResult {
        annotations: extension_map.model_annotations(),
        rows,
    })
}
