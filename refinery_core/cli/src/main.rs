mod commands;

use crate::commands::{
    handle_annotate, handle_groups, handle_publish, AnnotateArgs, GroupsSubcommand,
    PublishSubcommand,
};

use clap::{Parser, Subcommand};
use common::error::RefineryError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "refinery")]
pub struct Cli {
    #[arg(
        long = "config-path",
        short = 'c',
        help = "directory holding refinery-project.yml",
        global = true
    )]
    pub config_path: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Run the annotation steps of a transformation and print the model annotations
    Annotate(AnnotateArgs),
    /// Inspect and edit the shared annotation groups
    #[command(subcommand)]
    Groups(GroupsSubcommand),
    /// Publish connections and models to the BI server
    #[command(subcommand)]
    Publish(PublishSubcommand),
}

fn run_cmd(func: Result<(), RefineryError>) {
    if let Err(e) = func {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    logging::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Cmd::Annotate(args) => run_cmd(handle_annotate(&args, cli.config_path.clone())),
        Cmd::Groups(args) => run_cmd(handle_groups(&args, cli.config_path.clone())),
        Cmd::Publish(args) => run_cmd(handle_publish(&args, cli.config_path.clone())),
    }
}
