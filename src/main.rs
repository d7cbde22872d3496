use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use autopylot::app::{handle_fatal_error, init_logging, AppConfig};
use autopylot::config::RealVarEnv;
use autopylot::subprocess::SubprocessManager;
use autopylot::ConversionPipeline;

/// Convert notebooks with jupytext and push the outputs back
#[derive(Parser)]
#[command(name = "autopylot")]
#[command(
    about = "Convert notebooks with jupytext and push the outputs back",
    long_about = "Reads the GitHub Actions context (GITHUB_*) and action inputs (INPUT_*) \
                  from the environment, converts the selected files and commits the \
                  results to the target branch."
)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Repository checkout to work in
    #[arg(short = 'C', long, default_value = ".")]
    working_dir: PathBuf,

    /// Log the conversions and git commands without running them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let config = AppConfig::new(cli.verbose)
        .with_working_dir(cli.working_dir)
        .with_dry_run(cli.dry_run);

    init_logging(&config);

    let env = RealVarEnv::new();
    let result = ConversionPipeline::run_from_env(
        &env,
        config.working_dir.clone(),
        config.dry_run,
        SubprocessManager::production(),
    )
    .await;

    match result {
        Ok(outcome) => debug!("Run finished: {:?}", outcome),
        Err(e) => handle_fatal_error(e.into(), config.verbose),
    }
}
