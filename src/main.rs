//! Binary entry point for the Stagewatch CLI.

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use stagewatch::{
    HttpStatusSource, PollingConfig, ProgressionError, ProgressionVerifier, StageSpec,
};

mod cli;

use cli::{Cli, WaitCommand};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("wait failed: {0}")]
    Wait(#[from] ProgressionError),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

async fn dispatch(cli: Cli) -> Result<i32, CliError> {
    match cli {
        Cli::Wait(command) => wait_command(command).await,
    }
}

async fn wait_command(args: WaitCommand) -> Result<i32, CliError> {
    let config =
        PollingConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    config
        .validate()
        .map_err(|err| CliError::Config(err.to_string()))?;

    let poll_rate = args
        .poll_rate_secs
        .map_or_else(|| config.poll_rate(), Duration::from_secs);
    let retry_limit = args.retry_limit.unwrap_or(config.poll_failure_retry_limit);
    let auth_token = args.auth_token.or(config.auth_token);

    let source = HttpStatusSource::new(args.url, args.status_pointer).auth_token(auth_token);

    let stage = StageSpec::builder()
        .expected(args.expected)
        .acceptable(args.acceptable)
        .error(args.error_statuses)
        .poll_rate(poll_rate)
        .poll_failure_retry_limit(retry_limit)
        .build();

    ProgressionVerifier::new(args.model_type, args.model_id, source)
        .global_timeout(Duration::from_secs(args.timeout_secs))
        .add_stage(stage)
        .start()
        .await?;

    Ok(0)
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
