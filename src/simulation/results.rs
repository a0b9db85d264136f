use std::fmt;

use crate::craps::{BettingState, RollRecord};

/// The summary of one trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialResult {
    /// 1 based index of the trial in its run.
    pub trial_number: usize,
    /// How many rolls were actually made. Less than the configured
    /// rolls per trial if the bankroll ran out.
    pub rolls: usize,
    /// Final bankroll minus starting bankroll.
    pub profit_loss: f64,
    pub max_bankroll: f64,
    pub min_bankroll: f64,
    pub ended_in_ruin: bool,
    pub total_wagered: f64,
}

impl TrialResult {
    /// Summarize the state a trial ended with.
    pub fn from_state(trial_number: usize, state: &BettingState) -> Self {
        Self {
            trial_number,
            rolls: state.rolls,
            profit_loss: state.bankroll - state.starting_bankroll,
            max_bankroll: state.max_bankroll,
            min_bankroll: state.min_bankroll,
            ended_in_ruin: state.ruin_reached,
            total_wagered: state.total_wagered,
        }
    }

    pub fn is_win(&self) -> bool {
        !self.ended_in_ruin && self.profit_loss > 0.0
    }
}

/// A trial along with every roll it made.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialHistory {
    pub result: TrialResult,
    pub rolls: Vec<RollRecord>,
}

/// Statistics tabulated across all the trials of a run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateStatistics {
    /// The number of trials that have been run.
    pub total_trials: usize,
    /// How many trials ended up
    pub winning_trials: usize,
    /// How many trials ended even or down. Ruin counts here too.
    pub losing_trials: usize,
    /// How many trials lost the whole bankroll
    pub ruined_trials: usize,
    /// The best profit of any trial. This never goes below zero.
    pub max_profit: f64,
}

impl AggregateStatistics {
    /// Fold one more trial into the statistics.
    pub fn record(&mut self, result: &TrialResult) {
        self.total_trials += 1;

        if result.ended_in_ruin {
            self.ruined_trials += 1;
            self.losing_trials += 1;
        } else if result.profit_loss > 0.0 {
            self.winning_trials += 1;
        } else {
            self.losing_trials += 1;
        }

        self.max_profit = self.max_profit.max(result.profit_loss);
    }

    /// Fraction of trials that ended up. Zero before any trials are run.
    pub fn win_rate(&self) -> f64 {
        self.rate(self.winning_trials)
    }

    /// Fraction of trials that lost the whole bankroll.
    pub fn ruin_rate(&self) -> f64 {
        self.rate(self.ruined_trials)
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_trials == 0 {
            0.0
        } else {
            count as f64 / self.total_trials as f64
        }
    }
}

impl fmt::Display for AggregateStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total simulations:   {}", self.total_trials)?;
        writeln!(
            f,
            "Winning simulations: {} ({:.1}%)",
            self.winning_trials,
            self.win_rate() * 100.0
        )?;
        writeln!(f, "Losing simulations:  {}", self.losing_trials)?;
        writeln!(
            f,
            "Ruined simulations:  {} ({:.1}%)",
            self.ruined_trials,
            self.ruin_rate() * 100.0
        )?;
        write!(f, "Max profit:          ${:.2}", self.max_profit)
    }
}

/// Everything produced by one run of a simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationOutcome {
    pub statistics: AggregateStatistics,
    /// One result per completed trial, in order.
    pub trials: Vec<TrialResult>,
    /// The trials whose rolls were kept.
    pub histories: Vec<TrialHistory>,
    /// The run stopped early because it was cancelled.
    pub cancelled: bool,
}

impl SimulationOutcome {
    /// The first retained trial. With the default retention this is the
    /// first trial of the run.
    pub fn first_history(&self) -> Option<&TrialHistory> {
        self.histories.first()
    }
}
