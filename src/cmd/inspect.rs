use crate::reports;
use clap::Args;
use shbdo::batch::read_many;
use shbdo::config::DecodeConfig;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: DecodeConfig,

    /// BDO files to decode
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print decoded records as JSON instead of a summary table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Returns the process exit code: non-zero if any file failed to decode.
pub fn run(args: InspectArgs, config: DecodeConfig) -> i32 {
    info!("Decoding {} file(s)", args.files.len());
    let outcomes = read_many(&args.files, &config);

    if args.json {
        if let Err(e) = reports::print_json(&outcomes) {
            error!("Failed to serialize records: {}", e);
            return 1;
        }
        for outcome in &outcomes {
            if let Err(e) = &outcome.result {
                eprintln!("{}: {}", outcome.path.display(), e);
            }
        }
    } else {
        reports::print_summary_table(&outcomes);
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        error!("{} of {} file(s) failed", failed, outcomes.len());
        1
    } else {
        0
    }
}
