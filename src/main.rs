use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use shbdo::config::DecodeConfig;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with decode settings; flags given on the command line still win
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode BDO files and summarize their headers
    Inspect(cmd::inspect::InspectArgs),
}

fn resolve_config(
    path: &Option<String>,
    cli_config: &DecodeConfig,
    matches: Option<&ArgMatches>,
) -> DecodeConfig {
    let config = match path {
        Some(path) => {
            info!("Loading decode settings from: {}", path);
            let mut file_config = DecodeConfig::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(2);
            });
            if let Some(matches) = matches {
                file_config.merge_from_cli(cli_config, matches);
            }
            file_config
        }
        None => cli_config.clone(),
    };

    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(2);
    }
    config
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.debug);

    let code = match cli.command {
        Commands::Inspect(args) => {
            let sub_matches = matches.subcommand_matches("inspect");
            let config = resolve_config(&cli.config, &args.config, sub_matches);
            cmd::inspect::run(args, config)
        }
    };
    process::exit(code);
}
