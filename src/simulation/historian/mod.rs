use thiserror::Error;

use crate::craps::RollRecord;

use super::TrialResult;

/// HistorianError is the error type for historian implementations.
#[derive(Error, Debug)]
pub enum HistorianError {
    #[error("Unable to record roll")]
    UnableToRecordRoll,
    #[error("Borrow Mut Error: {0}")]
    BorrowMutError(#[from] std::cell::BorrowMutError),
}

/// Historians are a way for the simulation to record or notify of
/// rolls while a trial is progressing. This is useful for logging,
/// debugging, or for watching a run without keeping every roll in
/// the outcome.
pub trait Historian {
    /// This method is called by the runner after every roll is settled.
    ///
    /// # Arguments
    /// - `trial` - The 1 based index of the trial the roll belongs to.
    /// - `record` - The settled roll.
    ///
    /// # Returns
    /// - `Ok(())` if the roll was recorded successfully
    /// - `Err(HistorianError)` if there was an error recording the roll.
    ///
    /// Returning an error will cause the historian to be dropped from the
    /// run.
    fn record_roll(&mut self, trial: usize, record: &RollRecord) -> Result<(), HistorianError>;

    /// Called once a trial has finished. Most historians only care about
    /// rolls so the default does nothing.
    fn record_trial(&mut self, _result: &TrialResult) -> Result<(), HistorianError> {
        Ok(())
    }
}

mod failing;
mod fn_historian;
mod vec;

pub use failing::FailingHistorian;
pub use fn_historian::FnHistorian;
pub use vec::{HistoryRecord, VecHistorian};
