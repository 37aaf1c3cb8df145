use annotations::transformation::{run_transformation, TransformationDefinition};
use annotations::{AnnotationGroup, MemoryAnnotationStore};
use clap::Args;
use common::config::loader::read_config;
use common::error::RefineryError;
use log::info;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Transformation definition to run
    #[arg(long, short = 't', value_name = "FILE")]
    pub transformation: PathBuf,

    /// Store the resulting annotations as a shared group with this name
    #[arg(long, value_name = "NAME")]
    pub save_as: Option<String>,
}

/// Runs the transformation against the configured store and returns the
/// published annotations, if any.
pub fn annotate(
    args: &AnnotateArgs,
    config_path: Option<PathBuf>,
) -> Result<Option<AnnotationGroup>, RefineryError> {
    let cfg = read_config(config_path).map_err(RefineryError::init)?;
    let store =
        MemoryAnnotationStore::load_from(&cfg.annotation_store).map_err(RefineryError::init)?;
    let definition =
        TransformationDefinition::load(&args.transformation).map_err(RefineryError::annotate)?;

    let result = run_transformation(&definition, &store).map_err(RefineryError::annotate)?;

    if let (Some(name), Some(group)) = (&args.save_as, &result.annotations) {
        let mut shared = group.clone();
        shared.name = Some(name.clone());
        store.save_group(shared).map_err(RefineryError::annotate)?;
        store
            .flush_to(&cfg.annotation_store)
            .map_err(RefineryError::annotate)?;
        info!("Saved annotations as shared group `{}`", name);
    }
    Ok(result.annotations)
}

pub fn handle_annotate(
    args: &AnnotateArgs,
    config_path: Option<PathBuf>,
) -> Result<(), RefineryError> {
    match annotate(args, config_path)? {
        Some(group) => {
            let pretty = serde_json::to_string_pretty(&group).map_err(RefineryError::annotate)?;
            println!("{pretty}");
        }
        None => info!("Transformation published no model annotations"),
    }
    Ok(())
}
