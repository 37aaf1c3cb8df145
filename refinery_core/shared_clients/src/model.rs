use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

pub const PUBLISH_FAILED: i32 = 2;
pub const PUBLISH_SUCCESS: i32 = 3;
pub const PUBLISH_CATALOG_EXISTS: i32 = 8;

/// Outcome reported by the server for a publish request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    Failed,
    Success,
    CatalogExists,
}

impl PublishStatus {
    pub fn code(self) -> i32 {
        match self {
            PublishStatus::Failed => PUBLISH_FAILED,
            PublishStatus::Success => PUBLISH_SUCCESS,
            PublishStatus::CatalogExists => PUBLISH_CATALOG_EXISTS,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            PUBLISH_FAILED => Some(PublishStatus::Failed),
            PUBLISH_SUCCESS => Some(PublishStatus::Success),
            PUBLISH_CATALOG_EXISTS => Some(PublishStatus::CatalogExists),
            _ => None,
        }
    }

    /// Parse a response body holding a bare status code.
    pub fn from_body(body: &str) -> Option<Self> {
        body.trim().parse::<i32>().ok().and_then(Self::from_code)
    }
}

impl Display for PublishStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishStatus::Failed => write!(f, "failed"),
            PublishStatus::Success => write!(f, "success"),
            PublishStatus::CatalogExists => write!(f, "catalog exists"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DatabaseAccessType {
    #[default]
    Native,
    Odbc,
    Jndi,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseType {
    pub name: String,
    pub short_name: String,
}

/// Known database plugins as `(plugin id, display name)`.
const DATABASE_TYPES: &[(&str, &str)] = &[
    ("POSTGRESQL", "PostgreSQL"),
    ("MYSQL", "MySQL"),
    ("ORACLE", "Oracle"),
    ("MSSQL", "MS SQL Server"),
    ("H2", "H2"),
    ("HYPERSONIC", "Hypersonic"),
    ("GENERIC", "Generic database"),
];

impl DatabaseType {
    /// `None` for an empty or unknown plugin id.
    pub fn from_plugin_id(plugin_id: &str) -> Option<Self> {
        let plugin_id = plugin_id.trim();
        if plugin_id.is_empty() {
            return None;
        }
        DATABASE_TYPES
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(plugin_id))
            .map(|(id, name)| DatabaseType {
                name: name.to_string(),
                short_name: id.to_string(),
            })
    }
}

/// Connection definition as exchanged with the data access api.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseConnection {
    pub id: Option<String>,
    pub name: String,
    pub database_type: Option<DatabaseType>,
    pub access_type: DatabaseAccessType,
    pub hostname: String,
    pub database_name: String,
    pub database_port: String,
    pub username: String,
    pub password: String,
    pub extra_options: HashMap<String, String>,
    pub attributes: HashMap<String, String>,
    pub forcing_identifiers_to_lower_case: bool,
    pub quote_all_fields: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip_through_body() {
        assert_eq!(PublishStatus::from_body("3"), Some(PublishStatus::Success));
        assert_eq!(PublishStatus::from_body(" 8\n"), Some(PublishStatus::CatalogExists));
        assert_eq!(PublishStatus::from_body(""), None);
        assert_eq!(PublishStatus::from_body("42"), None);
        assert_eq!(PublishStatus::Failed.code(), PUBLISH_FAILED);
    }

    #[test]
    fn database_type_lookup() {
        assert_eq!(DatabaseType::from_plugin_id(""), None);
        assert_eq!(DatabaseType::from_plugin_id("NOT_A_DB"), None);
        let pg = DatabaseType::from_plugin_id("postgresql").unwrap();
        assert_eq!(pg.short_name, "POSTGRESQL");
        assert_eq!(pg.name, "PostgreSQL");
    }

    #[test]
    fn connection_parses_partial_payload() {
        let conn: DatabaseConnection = serde_json::from_str(r#"{"name":"test"}"#).unwrap();
        assert_eq!(conn.name, "test");
        assert_eq!(conn.access_type, DatabaseAccessType::Native);
        assert!(conn.database_type.is_none());
    }
}
