use std::fmt;
use std::panic::Location;

/// Error text plus the source location that raised it.
///
/// Error constructors across the workspace are `#[track_caller]`, so the
/// location points at the code that built the error rather than the helper.
#[derive(Clone, Debug)]
pub struct DiagnosticMessage {
    message: String,
    location: &'static Location<'static>,
}

impl DiagnosticMessage {
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
        }
    }

    /// The message as shown to users, without the location suffix.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl PartialEq<str> for DiagnosticMessage {
    fn eq(&self, other: &str) -> bool {
        self.message == other
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = self.location;
        write!(f, "{} (at {}:{})", self.message, loc.file(), loc.line())
    }
}
