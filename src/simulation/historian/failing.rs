use crate::craps::RollRecord;

use super::{Historian, HistorianError};

/// A historian that will always fail to record a roll
/// and will return an error.
///
/// This historian is useful for testing how the runner treats
/// historians that go bad.
pub struct FailingHistorian;

impl Historian for FailingHistorian {
    fn record_roll(&mut self, _trial: usize, _record: &RollRecord) -> Result<(), HistorianError> {
        Err(HistorianError::UnableToRecordRoll)
    }
}
