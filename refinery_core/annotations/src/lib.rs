pub mod config;
pub mod error;
pub mod extension;
pub mod graph;
pub mod merge;
pub mod model;
pub mod resolver;
pub mod step;
pub mod store;
pub mod transformation;
pub mod validator;

pub use config::{AnnotationSource, AnnotationStepConfig};
pub use error::{AnnotationError, INVALID_OUTPUT_STEP_MESSAGE};
pub use extension::{ExtensionDataMap, KEY_MODEL_ANNOTATIONS};
pub use graph::{StepGraph, TransformationGraph};
pub use merge::merge;
pub use model::*;
pub use resolver::resolve;
pub use step::{ModelAnnotationStep, RunState, StepContext};
pub use store::{AnnotationStore, MemoryAnnotationStore};
pub use validator::{validate, validate_target_step};
