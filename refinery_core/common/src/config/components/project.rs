use crate::config::components::acl::DataSourceAclModel;
use crate::config::components::connections::DatabaseMeta;
use crate::config::components::server::BiServerConnection;
use serde::Deserialize;
use std::path::PathBuf;

/// Raw shape of `refinery-project.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct RefineryProjectConfig {
    pub name: String,
    pub server: BiServerConnection,
    #[serde(default)]
    pub force_overwrite: bool,
    #[serde(default)]
    pub acl: Option<DataSourceAclModel>,
    #[serde(default)]
    pub connections: Vec<DatabaseMeta>,
    /// Relative to the project file.
    #[serde(default = "default_annotation_store")]
    pub annotation_store: PathBuf,
}

fn default_annotation_store() -> PathBuf {
    PathBuf::from("annotation-groups.json")
}
