use annotations::{AnnotationError, AnnotationGroup, AnnotationStore, MemoryAnnotationStore};
use clap::{Args, Subcommand};
use common::config::loader::{load_yaml, read_config};
use common::error::RefineryError;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct GroupNameArgs {
    /// Name of the shared annotation group
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ImportGroupArgs {
    /// Yaml file holding one annotation group
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: PathBuf,

    /// Store the group under this name instead of the one in the file
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum GroupsSubcommand {
    /// List the shared annotation groups
    List,
    /// Print a shared annotation group as json
    Show(GroupNameArgs),
    /// Add or replace a shared annotation group from a yaml file
    Import(ImportGroupArgs),
    /// Delete a shared annotation group
    Remove(GroupNameArgs),
}

fn open_store(store_path: &Path) -> Result<MemoryAnnotationStore, RefineryError> {
    MemoryAnnotationStore::load_from(store_path).map_err(RefineryError::init)
}

pub fn handle_groups(
    args: &GroupsSubcommand,
    config_path: Option<PathBuf>,
) -> Result<(), RefineryError> {
    let cfg = read_config(config_path).map_err(RefineryError::init)?;
    let store_path = cfg.annotation_store;
    let store = open_store(&store_path)?;

    match args {
        GroupsSubcommand::List => {
            let names = store.list_groups();
            if names.is_empty() {
                info!("No shared annotation groups in {}", store_path.display());
            }
            for name in names {
                println!("{name}");
            }
        }
        GroupsSubcommand::Show(g) => {
            let group = store
                .read_group(&g.name)
                .map_err(RefineryError::annotate)?
                .ok_or_else(|| RefineryError::annotate(AnnotationError::missing_group(&g.name)))?;
            let pretty = serde_json::to_string_pretty(&group).map_err(RefineryError::annotate)?;
            println!("{pretty}");
        }
        GroupsSubcommand::Import(i) => {
            let name = import_group(&store, i)?;
            store.flush_to(&store_path).map_err(RefineryError::annotate)?;
            info!("Imported shared annotation group `{}`", name);
        }
        GroupsSubcommand::Remove(g) => {
            store
                .remove_group(&g.name)
                .ok_or_else(|| RefineryError::annotate(AnnotationError::missing_group(&g.name)))?;
            store.flush_to(&store_path).map_err(RefineryError::annotate)?;
            info!("Removed shared annotation group `{}`", g.name);
        }
    }
    Ok(())
}

fn import_group(
    store: &MemoryAnnotationStore,
    args: &ImportGroupArgs,
) -> Result<String, RefineryError> {
    let mut group: AnnotationGroup = load_yaml(&args.file).map_err(RefineryError::annotate)?;
    if let Some(name) = &args.name {
        group.name = Some(name.clone());
    }
    let name = group.name.clone().unwrap_or_default();
    store.save_group(group).map_err(RefineryError::annotate)?;
    Ok(name)
}
