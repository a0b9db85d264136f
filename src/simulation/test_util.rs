use approx::assert_relative_eq;

use crate::craps::{BetType, BettingState, CrapsConfig, RollRecord};

use super::{AggregateStatistics, TrialResult};

pub fn assert_valid_state(config: &CrapsConfig, state: &BettingState) {
    assert!(state.bankroll >= 0.0, "negative bankroll {}", state.bankroll);
    assert!(state.min_bankroll <= state.bankroll);
    assert!(state.bankroll <= state.max_bankroll);
    assert!(state.min_bankroll <= state.starting_bankroll);
    assert!(state.max_bankroll >= state.starting_bankroll);

    // Ruin is exactly an empty bankroll, and once reached
    // no more rolls are made.
    assert_eq!(state.ruin_reached, state.bankroll == 0.0);

    // There are only six numbers to put a come bet on and
    // the main point is never one of them.
    assert!(state.come_bets.len() <= 6);
    if let Some(point) = state.point {
        assert!(!state.come_bets.contains(point));
    }
    if config.bet_type != BetType::ProgressiveCome {
        assert!(state.come_bets.is_empty());
    }
    for (_, bet) in state.come_bets.iter() {
        assert_eq!(config.pass_line_bet, bet.stake);
        assert!(bet.odds_stake >= 0.0);
    }
}

pub fn assert_valid_record(before: &BettingState, record: &RollRecord) {
    assert_eq!(before.rolls + 1, record.roll_number);
    assert_eq!(before.point.is_none(), record.was_come_out);
    assert_eq!(record.dice.total(), record.total);

    // Never bet what isn't there
    assert!(record.wager <= before.bankroll);
    if record.clamped {
        assert_eq!(before.bankroll, record.wager);
    }
    assert!(record.win_loss >= -record.wager);

    assert!(record.bankroll >= 0.0);
    assert_relative_eq!(
        before.bankroll + record.win_loss,
        record.bankroll,
        epsilon = 1e-9
    );
    assert_eq!(record.ruin, record.bankroll == 0.0);
    if record.ruin {
        assert!(record.description.ends_with(" - RUIN!"));
    }
    // A decided line bet always sends the game back to the come-out.
    if record.line_outcome.is_decision() {
        assert!(record.point.is_none());
    }
    if record.point_established {
        assert!(record.was_come_out);
        assert!(record.point.is_some());
    }
}

pub fn assert_valid_statistics(statistics: &AggregateStatistics, trials: &[TrialResult]) {
    assert_eq!(trials.len(), statistics.total_trials);
    assert_eq!(
        statistics.total_trials,
        statistics.winning_trials + statistics.losing_trials
    );
    assert!(statistics.ruined_trials <= statistics.losing_trials);

    let ruined = trials.iter().filter(|t| t.ended_in_ruin).count();
    let winning = trials.iter().filter(|t| t.is_win()).count();
    assert_eq!(ruined, statistics.ruined_trials);
    assert_eq!(winning, statistics.winning_trials);

    assert!(statistics.max_profit >= 0.0);
    for trial in trials {
        assert!(trial.profit_loss <= statistics.max_profit);
        assert!(trial.min_bankroll >= 0.0);
        assert!(trial.min_bankroll <= trial.max_bankroll);
        if trial.ended_in_ruin {
            assert_eq!(0.0, trial.min_bankroll);
        }
    }
    for (idx, trial) in trials.iter().enumerate() {
        assert_eq!(idx + 1, trial.trial_number);
    }
}
