//! Core library for the Stagewatch test-support toolkit.
//!
//! The crate exposes a generic status-progression engine for waiting on
//! asynchronous REST resources (volumes, snapshots, servers, load
//! balancers) to walk through their expected lifecycle transitions, plus
//! the timeout-budget arithmetic and per-service behavior helpers built on
//! top of it.

pub mod behavior;
pub mod budget;
pub mod config;
pub mod progression;
pub mod rest;
pub mod source;
pub mod test_support;

pub use behavior::{
    LoadBalancerBehavior, LoadBalancerStatus, ServerBehavior, ServerStatus, SnapshotBehavior,
    SnapshotStatus, VolumeBehavior, VolumeStatus,
};
pub use budget::{BudgetError, TimeoutRules, calculate_timeout};
pub use config::{ConfigError, PollingConfig};
pub use progression::{
    ProgressionError, ProgressionVerifier, StageSpec, StageSpecBuilder, StatusPoller,
};
pub use rest::{HttpSourceError, HttpStatusSource};
pub use source::{FnStatusSource, SourceFuture, StatusSource};
pub use test_support::{ScriptedSourceError, ScriptedStatusSource};
