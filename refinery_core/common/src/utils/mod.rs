use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::env;

static VARIABLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z0-9_.\-]+)\}").expect("valid variable regex"));

/// Variable space used to expand `${NAME}` placeholders in connection settings.
///
/// Explicitly set variables win over the process environment. Unknown
/// placeholders are left untouched.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: HashMap<String, String>,
    use_env: bool,
}

impl Variables {
    /// Only explicitly set variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit variables with the process environment as fallback.
    pub fn from_env() -> Self {
        Self {
            values: HashMap::new(),
            use_env: true,
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned().or_else(|| {
            if self.use_env {
                env::var(name).ok()
            } else {
                None
            }
        })
    }

    pub fn substitute(&self, input: &str) -> String {
        VARIABLE_PATTERN
            .replace_all(input, |caps: &Captures| {
                self.get(&caps[1]).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
