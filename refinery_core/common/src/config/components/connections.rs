use serde::Deserialize;
use std::collections::HashMap;

pub const PORT_NUMBER: &str = "PORT_NUMBER";
pub const FORCE_IDENTIFIERS_TO_LOWERCASE: &str = "FORCE_IDENTIFIERS_TO_LOWERCASE";
pub const QUOTE_ALL_FIELDS: &str = "QUOTE_ALL_FIELDS";

///  ---------------- Database Connections ----------------
///
/// A locally defined database connection. String fields may contain `${VAR}`
/// placeholders which are substituted before publishing.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct DatabaseMeta {
    pub name: String,
    /// Database plugin id, e.g. `POSTGRESQL`.
    pub plugin_id: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub database_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub extra_options: HashMap<String, String>,
    /// Dialect attributes such as `PORT_NUMBER` or `QUOTE_ALL_FIELDS`.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl DatabaseMeta {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// `Y` flags as used by the dialect attributes.
    pub fn attribute_flag(&self, key: &str) -> bool {
        self.attribute(key)
            .map(|v| v.eq_ignore_ascii_case("y"))
            .unwrap_or(false)
    }
}

pub type ConnectionsConfig = HashMap<String, DatabaseMeta>;
