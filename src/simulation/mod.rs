//! Running many independent trials of a betting configuration and
//! tabulating how the bankroll fared.
//!
//! The runner is created with `SimulationRunnerBuilder`. Every roll of
//! every trial is passed along to the historians, while the outcome keeps
//! the rolls of the trials the `HistoryRetention` asks for.
pub mod historian;
mod results;
mod runner;
mod sim_builder;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use historian::{FailingHistorian, FnHistorian, Historian, HistorianError, VecHistorian};
pub use results::{AggregateStatistics, SimulationOutcome, TrialHistory, TrialResult};
pub use runner::{HistoryRetention, SimulationRunner};
pub use sim_builder::SimulationRunnerBuilder;
