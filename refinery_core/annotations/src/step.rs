use crate::config::AnnotationStepConfig;
use crate::error::AnnotationError;
use crate::extension::{ExtensionDataMap, KEY_MODEL_ANNOTATIONS};
use crate::graph::StepGraph;
use crate::resolver::resolve;
use crate::store::AnnotationStore;
use crate::validator::{validate, validate_target_step};
use common::types::{Row, RowSchema};
use log::{debug, info};

/// Collaborators handed to a step by the host for one job run.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub store: &'a dyn AnnotationStore,
    pub graph: &'a dyn StepGraph,
    pub extension_map: &'a ExtensionDataMap,
}

/// Progress of one pass over the row stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    first: bool,
    rows_processed: u64,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            first: true,
            rows_processed: 0,
        }
    }

    pub fn is_first(&self) -> bool {
        self.first
    }

    pub fn rows_processed(&self) -> u64 {
        self.rows_processed
    }

    /// Re-arm the first row trigger, e.g. when annotations are re-attached.
    /// The next processed row appends the resolved group again.
    pub fn rearm(&mut self) {
        self.first = true;
    }
}

/// Attaches model annotations to a row stream and publishes them to the
/// job's [`ExtensionDataMap`]. Rows pass through untouched.
pub struct ModelAnnotationStep<'a> {
    config: &'a AnnotationStepConfig,
    ctx: StepContext<'a>,
}

impl<'a> ModelAnnotationStep<'a> {
    pub fn new(config: &'a AnnotationStepConfig, ctx: StepContext<'a>) -> Self {
        Self { config, ctx }
    }

    /// Handle one row; `None` marks the end of input.
    ///
    /// On the first row of a pass the target step is checked, the group is
    /// resolved and validated against `schema`, and only then merged under
    /// [`KEY_MODEL_ANNOTATIONS`]. Any failure leaves the map and `state`
    /// untouched.
    pub fn process_row(
        &self,
        state: &mut RunState,
        schema: &RowSchema,
        row: Option<Row>,
    ) -> Result<Option<Row>, AnnotationError> {
        if state.first {
            validate_target_step(self.config, self.ctx.graph)?;
            let group = resolve(self.config, self.ctx.store)?;
            validate(&group, schema)?;

            let stored = self
                .ctx
                .extension_map
                .merge_group(KEY_MODEL_ANNOTATIONS, &group);
            info!(
                "step '{}' published {} annotation(s), {} stored for the job",
                self.config.step_name,
                group.len(),
                stored
            );
            state.first = false;
        }

        if row.is_some() {
            state.rows_processed += 1;
        } else {
            debug!(
                "step '{}' finished after {} row(s)",
                self.config.step_name, state.rows_processed
            );
        }
        Ok(row)
    }

    /// Run a whole pass, returning the forwarded rows.
    pub fn run<I>(
        &self,
        state: &mut RunState,
        schema: &RowSchema,
        rows: I,
    ) -> Result<Vec<Row>, AnnotationError>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut out = Vec::new();
        for row in rows {
            if let Some(row) = self.process_row(state, schema, Some(row))? {
                out.push(row);
            }
        }
        self.process_row(state, schema, None)?;
        Ok(out)
    }
}
