use crate::config::components::connections::ConnectionsConfig;
use crate::config::components::global::RefineryConfig;
use crate::config::components::project::RefineryProjectConfig;
use crate::config::error::ConfigError;
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const PROJECT_FILE_NAME: &str = "refinery-project.yml";

/// Deserialize any yaml document from `path`.
pub fn load_yaml<T>(path: &Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    if !path.exists() {
        return Err(ConfigError::incorrect_path(path));
    }
    debug!("loading yaml from {}", path.display());
    let file = fs::File::open(path)?;
    Ok(serde_yaml::from_reader(file)?)
}

pub fn read_config(project_config_path: Option<PathBuf>) -> Result<RefineryConfig, ConfigError> {
    let proj_config_file_path = if let Some(config_path) = project_config_path {
        config_path.join(PROJECT_FILE_NAME)
    } else {
        PROJECT_FILE_NAME.into()
    };

    let proj_config: RefineryProjectConfig = load_yaml(&proj_config_file_path)?;

    let config_root = proj_config_file_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut connections = ConnectionsConfig::new();
    for conn in proj_config.connections {
        if connections.contains_key(&conn.name) {
            return Err(ConfigError::duplicate_connection(conn.name));
        }
        connections.insert(conn.name.clone(), conn);
    }

    Ok(RefineryConfig {
        name: proj_config.name,
        server: proj_config.server,
        force_overwrite: proj_config.force_overwrite,
        acl: proj_config.acl,
        connections,
        annotation_store: resolve_path(&config_root, &proj_config.annotation_store),
    })
}

fn resolve_path(root: &Path, candidate: &Path) -> PathBuf {
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(candidate)
    }
}
