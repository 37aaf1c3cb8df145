use crate::config::components::acl::DataSourceAclModel;
use crate::config::components::connections::{ConnectionsConfig, DatabaseMeta};
use crate::config::components::server::BiServerConnection;
use crate::config::error::ConfigError;
use std::path::PathBuf;

// ---------------- global config ----------------
#[derive(Debug, Clone)]
pub struct RefineryConfig {
    pub name: String,
    pub server: BiServerConnection,
    pub force_overwrite: bool,
    pub acl: Option<DataSourceAclModel>,
    pub connections: ConnectionsConfig,
    pub annotation_store: PathBuf,
}

impl RefineryConfig {
    pub fn get_connection(&self, name: &str) -> Result<&DatabaseMeta, ConfigError> {
        self.connections
            .get(name)
            .ok_or_else(|| ConfigError::missing_connection(name))
    }
}
