use std::process::ExitCode;

use drizzle::{OutputBuilder, OutputResult, RainConfig};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&RainConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &RainConfig) -> OutputResult<()> {
    let output = OutputBuilder::default_output().build(config)?;
    output.play_for(config.duration)?;
    if let Some(err) = output.take_stream_error() {
        warn!("stream reported an error during playback: {err}");
    }
    output.close();
    Ok(())
}
