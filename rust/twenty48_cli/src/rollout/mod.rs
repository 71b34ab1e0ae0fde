// rust/twenty48_cli/src/rollout/mod.rs
#![forbid(unsafe_code)]

mod runner;
mod sinks;
mod stats;

pub use runner::{Runner, RunnerConfig};
pub use sinks::{NoopSink, RolloutSink, TableSink};
