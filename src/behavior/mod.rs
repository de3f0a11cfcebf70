//! Per-service behavior helpers built on the progression engine.
//!
//! Each helper binds a status source to a resource kind, derives its wait
//! budget from [`TimeoutRules`](crate::budget::TimeoutRules), and assembles
//! stages from that resource's closed status vocabulary.

mod load_balancer;
mod server;
mod snapshot;
mod status;
mod volume;

use std::time::Duration;

use crate::progression::{StageSpec, StageSpecBuilder};

pub use load_balancer::LoadBalancerBehavior;
pub use server::ServerBehavior;
pub use snapshot::SnapshotBehavior;
pub use status::{LoadBalancerStatus, ServerStatus, SnapshotStatus, VolumeStatus};
pub use volume::VolumeBehavior;

const DEFAULT_POLL_RATE: Duration = Duration::from_secs(5);
const DEFAULT_RETRY_LIMIT: u32 = 3;

fn stage(poll_rate: Duration, retry_limit: u32) -> StageSpecBuilder {
    StageSpec::builder()
        .poll_rate(poll_rate)
        .poll_failure_retry_limit(retry_limit)
}

#[cfg(test)]
mod tests;
