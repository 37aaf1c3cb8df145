use common::error::diagnostics::DiagnosticMessage;
use common::error::ConfigError;
use std::io;
use thiserror::Error;

/// Shown when a non shared-dimension step has no usable data provider step.
pub const INVALID_OUTPUT_STEP_MESSAGE: &str = "Please select a valid data provider step.";

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("invalid output step: {context}")]
    InvalidOutputStep { context: DiagnosticMessage },
    #[error("annotation group not found: {context}")]
    MissingAnnotationGroup { context: DiagnosticMessage },
    #[error("annotation validation failed: {context}")]
    AnnotationValidation { context: DiagnosticMessage },
    #[error("transformation definition error: {context}")]
    Definition {
        context: DiagnosticMessage,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    #[error("annotation store error: {context}")]
    Store {
        context: DiagnosticMessage,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnnotationError {
    #[track_caller]
    pub fn invalid_output_step() -> Self {
        Self::InvalidOutputStep {
            context: DiagnosticMessage::new(INVALID_OUTPUT_STEP_MESSAGE),
        }
    }

    #[track_caller]
    pub fn missing_group(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::MissingAnnotationGroup {
            context: DiagnosticMessage::new(format!(
                "Annotation group '{name}' could not be found in the annotation store"
            )),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::AnnotationValidation {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            context: DiagnosticMessage::new(message.into()),
            source: None,
        }
    }

    /// The user facing message, without the call-site suffix.
    pub fn message(&self) -> &str {
        match self {
            AnnotationError::InvalidOutputStep { context }
            | AnnotationError::MissingAnnotationGroup { context }
            | AnnotationError::AnnotationValidation { context }
            | AnnotationError::Definition { context, .. }
            | AnnotationError::Store { context, .. } => context.message(),
        }
    }
}

impl From<io::Error> for AnnotationError {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        AnnotationError::Store {
            context: DiagnosticMessage::new(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for AnnotationError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        AnnotationError::Store {
            context: DiagnosticMessage::new(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<ConfigError> for AnnotationError {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        AnnotationError::Definition {
            context: DiagnosticMessage::new(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_output_step_message_is_exact() {
        let err = AnnotationError::invalid_output_step();
        assert_eq!(err.message().trim(), "Please select a valid data provider step.");
        assert!(err.to_string().contains(INVALID_OUTPUT_STEP_MESSAGE));
    }
}
