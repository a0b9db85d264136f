use crate::craps::RollRecord;

use super::{Historian, HistorianError};

/// A historian that calls a function for every roll it's told about.
/// This is useful for testing and debugging, or for streaming rolls
/// somewhere without keeping them.
#[derive(Debug, Clone)]
pub struct FnHistorian<F> {
    func: F,
}

impl<F: FnMut(usize, &RollRecord) -> Result<(), HistorianError>> FnHistorian<F> {
    /// Create a new `FnHistorian` with the provided function
    /// that will be called when a roll is settled.
    pub fn new(f: F) -> Self {
        Self { func: f }
    }
}

impl<F: FnMut(usize, &RollRecord) -> Result<(), HistorianError>> Historian for FnHistorian<F> {
    fn record_roll(&mut self, trial: usize, record: &RollRecord) -> Result<(), HistorianError> {
        (self.func)(trial, record)
    }
}
