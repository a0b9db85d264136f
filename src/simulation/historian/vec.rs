use std::{cell::RefCell, rc::Rc};

use crate::craps::RollRecord;
use crate::simulation::TrialResult;

use super::{Historian, HistorianError};

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryRecord {
    Roll { trial: usize, record: RollRecord },
    Trial(TrialResult),
}

/// VecHistorian is a historian that will
/// append each roll and finished trial to a vector.
pub struct VecHistorian {
    records: Rc<RefCell<Vec<HistoryRecord>>>,
}

impl VecHistorian {
    /// Create a new storage for the historian
    /// that can be introspected later.
    pub fn new_storage() -> Rc<RefCell<Vec<HistoryRecord>>> {
        Rc::new(RefCell::new(vec![]))
    }

    /// Create a new VecHistorian with the provided storage
    /// `Rc<RefCell<Vec<HistoryRecord>>>`
    pub fn new(records: Rc<RefCell<Vec<HistoryRecord>>>) -> Self {
        Self { records }
    }
}

impl Historian for VecHistorian {
    fn record_roll(&mut self, trial: usize, record: &RollRecord) -> Result<(), HistorianError> {
        let mut records = self.records.try_borrow_mut()?;
        records.push(HistoryRecord::Roll {
            trial,
            record: record.clone(),
        });
        Ok(())
    }

    fn record_trial(&mut self, result: &TrialResult) -> Result<(), HistorianError> {
        self.records
            .try_borrow_mut()?
            .push(HistoryRecord::Trial(result.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::craps::CrapsConfig;
    use crate::simulation::SimulationRunnerBuilder;

    use super::*;

    #[test]
    fn test_vec_historian() {
        let records = VecHistorian::new_storage();
        let hist = Box::new(VecHistorian::new(records.clone()));

        let config = CrapsConfig::default().num_trials(3).rolls_per_trial(25);
        let mut runner = SimulationRunnerBuilder::default()
            .config(config)
            .rng(StdRng::seed_from_u64(7))
            .historians(vec![hist])
            .build()
            .unwrap();
        let outcome = runner.run();

        let records = records.borrow();
        let rolls: usize = outcome.trials.iter().map(|t| t.rolls).sum();
        let trials: Vec<&TrialResult> = records
            .iter()
            .filter_map(|r| match r {
                HistoryRecord::Trial(t) => Some(t),
                HistoryRecord::Roll { .. } => None,
            })
            .collect();

        assert_eq!(rolls + 3, records.len());
        assert_eq!(3, trials.len());
        assert_eq!(outcome.trials.iter().collect::<Vec<_>>(), trials);
        // Every trial ends with its result after its own rolls
        assert!(matches!(records.last(), Some(HistoryRecord::Trial(t)) if t.trial_number == 3));
    }

    #[test]
    fn test_borrowed_storage_errors() {
        let records = VecHistorian::new_storage();
        let mut hist = VecHistorian::new(records.clone());
        let config = CrapsConfig::default();
        let mut engine = crate::craps::BettingEngine::new(config).unwrap();
        let record = engine.resolve_roll(crate::core::Dice::new(3, 4).unwrap());

        let _held = records.borrow();
        assert!(matches!(
            hist.record_roll(1, &record),
            Err(HistorianError::BorrowMutError(_))
        ));
    }
}
