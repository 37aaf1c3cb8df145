pub mod bi_server;
pub mod model;

pub use bi_server::BiServerClient;
pub use model::*;

use common::error::diagnostics::DiagnosticMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BiServerClientError {
    #[error("invalid argument: {context}")]
    InvalidArgument { context: DiagnosticMessage },
    #[error("missing configuration: {context}")]
    MissingConfig { context: DiagnosticMessage },
    #[error("http client error: {context}")]
    Http {
        context: DiagnosticMessage,
        #[source]
        source: reqwest::Error,
    },
}

impl BiServerClientError {
    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn missing_config(message: impl Into<String>) -> Self {
        Self::MissingConfig {
            context: DiagnosticMessage::new(message.into()),
        }
    }
}

impl From<reqwest::Error> for BiServerClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        BiServerClientError::Http {
            context: DiagnosticMessage::new(err.to_string()),
            source: err,
        }
    }
}
