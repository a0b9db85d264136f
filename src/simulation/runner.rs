use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{event, trace_span};

use crate::core::DiceRoller;
use crate::craps::{BettingEngine, CrapsConfig, RollRecord};

use super::historian::{Historian, HistorianError};
use super::results::{AggregateStatistics, SimulationOutcome, TrialHistory, TrialResult};

/// Which trials keep every roll in the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryRetention {
    /// Keep only the rolls of the first trial.
    #[default]
    FirstTrial,
    All,
    /// Keep no rolls at all. Historians still see every roll.
    Off,
}

impl HistoryRetention {
    fn keeps(&self, trial_number: usize) -> bool {
        match self {
            HistoryRetention::FirstTrial => trial_number == 1,
            HistoryRetention::All => true,
            HistoryRetention::Off => false,
        }
    }
}

/// Runs every trial of a simulation one after another.
///
/// Use `SimulationRunnerBuilder` to create one.
pub struct SimulationRunner {
    pub(crate) engine: BettingEngine,
    pub(crate) dice: Box<dyn DiceRoller>,
    pub(crate) historians: Vec<Box<dyn Historian>>,
    pub(crate) retention: HistoryRetention,
    pub(crate) cancel: Option<Arc<AtomicBool>>,
    pub(crate) panic_on_historian_error: bool,
}

impl SimulationRunner {
    pub fn config(&self) -> &CrapsConfig {
        self.engine.config()
    }

    /// How many historians are still attached. Historians that
    /// returned an error have been dropped.
    pub fn num_historians(&self) -> usize {
        self.historians.len()
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|cancel| cancel.load(Ordering::Relaxed))
    }

    /// Run all of the configured trials.
    ///
    /// Statistics start over on every call. If the cancel flag is set
    /// between two trials the run stops and returns the trials that were
    /// completed.
    pub fn run(&mut self) -> SimulationOutcome {
        let span = trace_span!("SimulationRunner::run");
        let _enter = span.enter();

        let num_trials = self.engine.config().num_trials;
        let mut statistics = AggregateStatistics::default();
        let mut trials = vec![];
        let mut histories = vec![];
        let mut cancelled = false;

        for trial_number in 1..=num_trials {
            if self.is_cancelled() {
                event!(
                    tracing::Level::INFO,
                    completed = trial_number - 1,
                    "Simulation cancelled"
                );
                cancelled = true;
                break;
            }

            let (result, rolls) = self.run_trial(trial_number);
            statistics.record(&result);
            if let Some(rolls) = rolls {
                histories.push(TrialHistory {
                    result: result.clone(),
                    rolls,
                });
            }
            trials.push(result);
        }

        event!(
            tracing::Level::INFO,
            trials = statistics.total_trials,
            winning = statistics.winning_trials,
            ruined = statistics.ruined_trials,
            max_profit = statistics.max_profit,
            "Simulation finished"
        );

        SimulationOutcome {
            statistics,
            trials,
            histories,
            cancelled,
        }
    }

    /// Play a single trial from a fresh bankroll until the rolls run out
    /// or the bankroll is gone. The rolls are returned if the retention
    /// keeps this trial.
    pub fn run_trial(&mut self, trial_number: usize) -> (TrialResult, Option<Vec<RollRecord>>) {
        let span = trace_span!("SimulationRunner::run_trial", trial_number);
        let _enter = span.enter();

        let rolls_per_trial = self.engine.config().rolls_per_trial;
        // The roll cap is only an upper bound, so nothing is reserved from it.
        let mut kept = self.retention.keeps(trial_number).then(Vec::new);

        self.engine.reset();
        while !self.engine.is_finished() && self.engine.state().rolls < rolls_per_trial {
            let record = self.engine.roll(&mut self.dice);
            event!(
                tracing::Level::TRACE,
                roll = record.roll_number,
                total = record.total,
                wager = record.wager,
                win_loss = record.win_loss,
                bankroll = record.bankroll,
                description = %record.description,
                "Roll settled"
            );

            self.notify_historians(|historian| historian.record_roll(trial_number, &record));
            if let Some(kept) = kept.as_mut() {
                kept.push(record);
            }
        }

        let result = TrialResult::from_state(trial_number, self.engine.state());
        event!(
            tracing::Level::INFO,
            trial_number,
            rolls = result.rolls,
            profit_loss = result.profit_loss,
            ruin = result.ended_in_ruin,
            "Trial finished"
        );
        self.notify_historians(|historian| historian.record_trial(&result));

        (result, kept)
    }

    fn notify_historians<F>(&mut self, mut notify: F)
    where
        F: FnMut(&mut dyn Historian) -> Result<(), HistorianError>,
    {
        let panic_on_historian_error = self.panic_on_historian_error;
        self.historians
            .retain_mut(|historian| match notify(historian.as_mut()) {
                Ok(()) => true,
                Err(error) => {
                    if panic_on_historian_error {
                        panic!("Historian failed to record: {error}");
                    }
                    event!(
                        tracing::Level::WARN,
                        ?error,
                        "Historian failed to record, dropping it"
                    );
                    false
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::core::ReplayDiceRoller;
    use crate::craps::{BetType, OddsMode};
    use crate::simulation::SimulationRunnerBuilder;
    use crate::simulation::test_util::assert_valid_statistics;

    use super::*;

    fn runner(config: CrapsConfig, seed: u64) -> SimulationRunner {
        SimulationRunnerBuilder::default()
            .config(config)
            .rng(StdRng::seed_from_u64(seed))
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn test_run_counts_every_trial() {
        let config = CrapsConfig::default().num_trials(40).rolls_per_trial(150);
        let outcome = runner(config, 420).run();

        assert_eq!(40, outcome.trials.len());
        assert!(!outcome.cancelled);
        assert_valid_statistics(&outcome.statistics, &outcome.trials);
        for trial in &outcome.trials {
            assert!(trial.rolls <= 150);
            // Only ruin ends a trial early
            if !trial.ended_in_ruin {
                assert_eq!(150, trial.rolls);
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        for bet_type in [BetType::Pass, BetType::DontPass, BetType::ProgressiveCome] {
            let config = CrapsConfig::default()
                .bet_type(bet_type)
                .odds_mode(OddsMode::Table345x)
                .starting_bankroll(300.0)
                .num_trials(10)
                .rolls_per_trial(80);
            let first = runner(config.clone(), 1).run();
            let second = runner(config, 1).run();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_statistics_reset_between_runs() {
        let config = CrapsConfig::default().num_trials(5).rolls_per_trial(20);
        let mut runner = runner(config, 3);
        runner.run();
        let outcome = runner.run();
        assert_eq!(5, outcome.statistics.total_trials);
        assert_valid_statistics(&outcome.statistics, &outcome.trials);
    }

    #[test]
    fn test_ruin_stops_the_trial() {
        // Every roll is a seven out after a point of four, so 10 + 20
        // is lost every other roll and 60 is gone in four rolls.
        let config = CrapsConfig::default()
            .starting_bankroll(60.0)
            .rolls_per_trial(100)
            .num_trials(2);
        let dice = ReplayDiceRoller::from_pairs(&[(2, 2), (3, 4)]).unwrap();
        let mut runner = SimulationRunnerBuilder::default()
            .config(config)
            .dice(dice)
            .retention(HistoryRetention::All)
            .build()
            .unwrap();

        let outcome = runner.run();
        for history in &outcome.histories {
            assert_eq!(4, history.result.rolls);
            assert_eq!(4, history.rolls.len());
            assert!(history.result.ended_in_ruin);
            assert_eq!(-60.0, history.result.profit_loss);
            assert!(history.rolls.last().unwrap().ruin);
        }
        assert_eq!(2, outcome.statistics.ruined_trials);
        assert_eq!(2, outcome.statistics.losing_trials);
        assert_eq!(0.0, outcome.statistics.max_profit);
    }

    #[test]
    fn test_history_retention() {
        let config = CrapsConfig::default().num_trials(3).rolls_per_trial(10);

        let outcome = runner(config.clone(), 9).run();
        assert_eq!(1, outcome.histories.len());
        assert_eq!(1, outcome.first_history().unwrap().result.trial_number);
        assert_eq!(outcome.trials[0], outcome.histories[0].result);

        let all = SimulationRunnerBuilder::default()
            .config(config.clone())
            .rng(StdRng::seed_from_u64(9))
            .retention(HistoryRetention::All)
            .build()
            .unwrap()
            .run();
        assert_eq!(3, all.histories.len());
        // Retention doesn't change what happens
        assert_eq!(outcome.trials, all.trials);
        assert_eq!(outcome.histories[0], all.histories[0]);

        let off = SimulationRunnerBuilder::default()
            .config(config)
            .rng(StdRng::seed_from_u64(9))
            .retention(HistoryRetention::Off)
            .build()
            .unwrap()
            .run();
        assert!(off.histories.is_empty());
        assert_eq!(outcome.trials, off.trials);
    }

    #[test]
    fn test_huge_roll_cap_ends_on_ruin() {
        let config = CrapsConfig::default()
            .starting_bankroll(30.0)
            .rolls_per_trial(usize::MAX / 4);
        let dice = ReplayDiceRoller::from_pairs(&[(2, 2), (3, 4)]).unwrap();
        let mut runner = SimulationRunnerBuilder::default()
            .config(config)
            .dice(dice)
            .build()
            .unwrap();

        let outcome = runner.run();
        assert_eq!(1, outcome.trials.len());
        assert_eq!(2, outcome.trials[0].rolls);
        assert!(outcome.trials[0].ended_in_ruin);
        assert_eq!(2, outcome.histories[0].rolls.len());
    }

    #[test]
    fn test_cancel_with_huge_trial_count() {
        let mut runner = SimulationRunnerBuilder::default()
            .config(CrapsConfig::default().num_trials(usize::MAX / 4))
            .rng(StdRng::seed_from_u64(1))
            .cancel_flag(Arc::new(AtomicBool::new(true)))
            .build()
            .unwrap();

        let outcome = runner.run();
        assert!(outcome.cancelled);
        assert!(outcome.trials.is_empty());
    }

    #[test]
    fn test_cancel_before_run() {
        let cancel = Arc::new(AtomicBool::new(true));
        let mut runner = SimulationRunnerBuilder::default()
            .config(CrapsConfig::default().num_trials(10))
            .rng(StdRng::seed_from_u64(1))
            .cancel_flag(cancel)
            .build()
            .unwrap();

        let outcome = runner.run();
        assert!(outcome.cancelled);
        assert!(outcome.trials.is_empty());
        assert_eq!(0, outcome.statistics.total_trials);
    }

    #[test]
    fn test_cancel_between_trials() {
        let cancel = Arc::new(AtomicBool::new(false));
        let trigger = cancel.clone();
        let historian = Box::new(crate::simulation::FnHistorian::new(
            move |trial, _record: &RollRecord| {
                if trial == 2 {
                    trigger.store(true, Ordering::Relaxed);
                }
                Ok(())
            },
        ));

        let mut runner = SimulationRunnerBuilder::default()
            .config(CrapsConfig::default().num_trials(10).rolls_per_trial(5))
            .rng(StdRng::seed_from_u64(1))
            .historians(vec![historian])
            .cancel_flag(cancel)
            .build()
            .unwrap();

        // The second trial runs to completion, then the run stops
        let outcome = runner.run();
        assert!(outcome.cancelled);
        assert_eq!(2, outcome.trials.len());
        assert_eq!(2, outcome.statistics.total_trials);
        assert_eq!(5, outcome.trials[1].rolls);
    }
}
