//! Command-line interface definitions for the `stagewatch` binary.
//!
//! This module centralises the clap parser structures so both the main
//! binary and the build script can reuse them when generating the manual
//! page.

use clap::Parser;

/// Top-level CLI for the `stagewatch` binary.
#[derive(Debug, Parser)]
#[command(
    name = "stagewatch",
    about = "Wait for a REST resource to reach a target status",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Poll a resource URL until its status reaches a target.
    #[command(
        name = "wait",
        about = "Poll a resource URL until its status reaches a target"
    )]
    Wait(WaitCommand),
}

/// Arguments for the `stagewatch wait` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct WaitCommand {
    /// URL of the resource entity to poll.
    #[arg(long, value_name = "URL")]
    pub(crate) url: String,
    /// JSON pointer to the status string within the entity
    /// (for example `/volume/status`).
    #[arg(long, value_name = "POINTER", default_value = "/status")]
    pub(crate) status_pointer: String,
    /// Status that completes the wait successfully (repeatable).
    #[arg(long = "expect", value_name = "STATUS", required = true)]
    pub(crate) expected: Vec<String>,
    /// Later-lifecycle status that also completes the wait (repeatable).
    #[arg(long = "acceptable", value_name = "STATUS")]
    pub(crate) acceptable: Vec<String>,
    /// Status that fails the wait immediately (repeatable).
    #[arg(long = "error-status", value_name = "STATUS")]
    pub(crate) error_statuses: Vec<String>,
    /// Overall wait budget in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 300)]
    pub(crate) timeout_secs: u64,
    /// Sleep between polls in seconds; defaults to the configured poll rate.
    #[arg(long, value_name = "SECONDS")]
    pub(crate) poll_rate_secs: Option<u64>,
    /// Status-fetch failures tolerated before aborting; defaults to the
    /// configured retry limit.
    #[arg(long, value_name = "COUNT")]
    pub(crate) retry_limit: Option<u32>,
    /// Resource kind used in log and error messages.
    #[arg(long, value_name = "TYPE", default_value = "resource")]
    pub(crate) model_type: String,
    /// Resource identifier used in log and error messages.
    #[arg(long, value_name = "ID", default_value = "unknown")]
    pub(crate) model_id: String,
    /// Authentication token sent as `X-Auth-Token`.
    #[arg(long, value_name = "TOKEN", env = "STAGEWATCH_AUTH_TOKEN")]
    pub(crate) auth_token: Option<String>,
}
