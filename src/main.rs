use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use slack_wipe::cli::{self, Cli};
use slack_wipe::config::WipeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let config = WipeConfig::load(&cli)?;
    if config.quiet {
        // `Quiet` can also come from the config file
        log::set_max_level(LevelFilter::Off);
    }
    info!("Starting slack-wipe for channel {:?}", config.team.channel);

    cli::run_wipe(config).await
}

/// Log to stderr with timestamps; `RUST_LOG` overrides the default level
fn init_logging(quiet: bool, verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder
        .target(env_logger::Target::Stderr)
        .format_timestamp_secs()
        .format_target(false);

    if quiet {
        builder.filter_level(LevelFilter::Off);
    } else if verbose {
        builder.filter_module("slack_wipe", LevelFilter::Debug);
    }

    builder.init();
}
