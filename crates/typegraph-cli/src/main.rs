use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

mod commands;
mod error;
mod utils;

use commands::{has::handle_has, ingest::handle_ingest, show::handle_show};
use error::CliError;

#[derive(Parser, Debug)]
#[command(name = "typegraph")]
#[command(about = "Persists checked package graphs into a key-value store", long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Config file (defaults to the nearest typegraph.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Database file, overriding the configured one
    #[arg(short, long, global = true, value_name = "DB")]
    store: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Encode packages of a checked universe, dependencies first
    Ingest {
        /// JSON universe produced by the checker
        #[arg(value_name = "UNIVERSE")]
        universe: PathBuf,
        /// Import path to ingest; repeatable (defaults to every package)
        #[arg(short, long = "package", value_name = "PATH")]
        packages: Vec<String>,
    },

    /// Report whether a package is already in the graph
    Has {
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Print the value stored under a key (write NUL as `\0`)
    Show {
        #[arg(value_name = "KEY")]
        key: String,
    },
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let config = utils::load_config(args.config.as_deref(), args.store)?;
    match args.command {
        Command::Ingest { universe, packages } => handle_ingest(config, &universe, packages),
        Command::Has { path } => handle_has(config, &path),
        Command::Show { key } => handle_show(config, &key),
    }
}
