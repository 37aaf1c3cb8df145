use clap::{Args, Subcommand};
use common::config::components::global::RefineryConfig;
use common::config::loader::read_config;
use common::error::RefineryError;
use log::info;
use shared_clients::{BiServerClient, PublishStatus};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

#[derive(Debug, Args)]
pub struct DataSourceArgs {
    /// Name of the connection in refinery-project.yml
    #[arg(long, value_name = "NAME")]
    pub connection: String,

    /// Replace the connection if it already exists on the server
    #[arg(long)]
    pub update: bool,
}

#[derive(Debug, Args)]
pub struct MondrianArgs {
    /// Mondrian schema file
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long, value_name = "NAME")]
    pub catalog: String,

    /// Data source the catalog reads from
    #[arg(long, value_name = "NAME")]
    pub datasource: String,

    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Args)]
pub struct DomainArgs {
    /// Metadata (xmi) file
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long, value_name = "ID")]
    pub domain_id: String,
}

#[derive(Debug, Subcommand)]
pub enum PublishSubcommand {
    /// Publish a database connection
    #[command(name = "datasource")]
    DataSource(DataSourceArgs),
    /// Publish a Mondrian schema as an analysis catalog
    Mondrian(MondrianArgs),
    /// Publish a metadata model
    Metadata(DomainArgs),
    /// Publish a data source wizard model
    Dsw(DomainArgs),
}

fn client_for(cfg: &RefineryConfig) -> Result<BiServerClient, RefineryError> {
    let mut client = BiServerClient::new(cfg.server.clone()).map_err(RefineryError::publish)?;
    client.set_force_overwrite(cfg.force_overwrite);
    client.set_acl_model(cfg.acl.clone());
    Ok(client)
}

fn read_model(path: &Path) -> Result<Vec<u8>, RefineryError> {
    fs::read(path).map_err(|e| {
        RefineryError::publish_msg(format!("unable to read {}: {}", path.display(), e))
    })
}

fn expect_success(status: PublishStatus, what: &str) -> Result<(), RefineryError> {
    match status {
        PublishStatus::Success => {
            info!("Published {}", what);
            Ok(())
        }
        PublishStatus::CatalogExists => Err(RefineryError::publish_msg(format!(
            "{what} already exists on the server, rerun with --overwrite to replace it"
        ))),
        PublishStatus::Failed => Err(RefineryError::publish_msg(format!(
            "the server rejected {what}"
        ))),
    }
}

pub fn handle_publish(
    args: &PublishSubcommand,
    config_path: Option<PathBuf>,
) -> Result<(), RefineryError> {
    let cfg = read_config(config_path).map_err(RefineryError::init)?;
    let mut client = client_for(&cfg)?;
    let runtime = Runtime::new().map_err(RefineryError::publish)?;

    match args {
        PublishSubcommand::DataSource(d) => {
            let meta = cfg
                .get_connection(&d.connection)
                .map_err(RefineryError::publish)?
                .clone();
            client.set_database_meta(Some(meta));

            let existing =
                runtime.block_on(client.connection_name_exists(Some(d.connection.as_str())));
            let published = match (existing, d.update) {
                (Some(conn), true) => {
                    runtime.block_on(client.publish_data_source(true, conn.id.as_deref()))
                }
                (Some(_), false) => {
                    info!(
                        "Connection `{}` already exists, rerun with --update to replace it",
                        d.connection
                    );
                    return Ok(());
                }
                (None, _) => runtime.block_on(client.publish_data_source(false, None)),
            };
            if !published {
                return Err(RefineryError::publish_msg(format!(
                    "the server rejected connection `{}`",
                    d.connection
                )));
            }
            info!("Published connection `{}`", d.connection);
        }
        PublishSubcommand::Mondrian(m) => {
            let schema = read_model(&m.file)?;
            let status = runtime.block_on(client.publish_mondrian_schema(
                schema,
                &m.catalog,
                &m.datasource,
                m.overwrite || cfg.force_overwrite,
            ));
            expect_success(status, &format!("catalog `{}`", m.catalog))?;
        }
        PublishSubcommand::Metadata(d) => {
            let xmi = read_model(&d.file)?;
            let status = runtime.block_on(client.publish_metadata_file(xmi, &d.domain_id));
            expect_success(status, &format!("metadata domain `{}`", d.domain_id))?;
        }
        PublishSubcommand::Dsw(d) => {
            let xmi = read_model(&d.file)?;
            let status = runtime
                .block_on(client.publish_dsw(xmi, &d.domain_id))
                .map_err(RefineryError::publish)?;
            expect_success(status, &format!("data source wizard model `{}`", d.domain_id))?;
        }
    }
    Ok(())
}
