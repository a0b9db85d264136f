use crate::core::{Dice, Point};

/// What happened to the line (pass or don't pass) bet on a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineOutcome {
    Win,
    Loss,
    /// Don't pass on a come-out 12. The bet stays but nothing changes hands.
    Push,
    /// The come-out roll set a point. No money changes hands.
    PointEstablished(Point),
    /// A point roll that was neither the point nor a seven.
    NoDecision,
}

impl LineOutcome {
    /// Did this roll decide the line bet one way or the other.
    pub fn is_decision(&self) -> bool {
        matches!(self, LineOutcome::Win | LineOutcome::Loss | LineOutcome::Push)
    }
}

/// Everything that can happen to come bets on a single roll.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComeEvent {
    /// Odds were taken on a come bet established on an earlier roll.
    OddsAttached { point: Point, odds_stake: f64 },
    /// A come bet's point repeated. `amount` is the winnings including odds.
    PointWin { point: Point, amount: f64 },
    /// A seven took down every come bet. `amount` is the total lost.
    SevenOut { bets: usize, amount: f64 },
    /// A new come bet won right away on a 7 or 11.
    ImmediateWin { total: u8, amount: f64 },
    /// A new come bet lost right away on a 2, 3, or 12.
    ImmediateLoss { total: u8, amount: f64 },
    /// A new come bet traveled to a point.
    Placed { point: Point, stake: f64 },
}

impl ComeEvent {
    /// The short human readable version of this event. Odds being
    /// attached isn't a result so it has no label.
    pub fn label(&self) -> Option<String> {
        match self {
            ComeEvent::OddsAttached { .. } => None,
            ComeEvent::PointWin { point, .. } => Some(format!("Come bet {point} wins")),
            ComeEvent::SevenOut { .. } => Some("Come bets lose (7 out)".to_string()),
            ComeEvent::ImmediateWin { total, .. } => Some(format!("Come bet wins ({total})")),
            ComeEvent::ImmediateLoss { total, .. } => Some(format!("Come bet loses ({total})")),
            ComeEvent::Placed { point, .. } => Some(format!("Come bet placed on {point}")),
        }
    }
}

/// The immutable record of one roll.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollRecord {
    /// 1 based index of the roll in its trial.
    pub roll_number: usize,
    pub dice: Dice,
    pub total: u8,
    /// The total amount at risk on this roll after clamping to the bankroll.
    pub wager: f64,
    /// Net result of the roll. Positive is a win.
    pub win_loss: f64,
    /// Net result of the trial so far.
    pub running_total: f64,
    /// Bankroll after the roll settled.
    pub bankroll: f64,
    pub description: String,
    pub line_outcome: LineOutcome,
    pub come_events: Vec<ComeEvent>,
    /// The point after this roll. `None` means the next roll is a come-out.
    pub point: Option<Point>,
    pub was_come_out: bool,
    pub point_established: bool,
    /// The wager was cut down to what was left in the bankroll.
    pub clamped: bool,
    pub ruin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_settled_line_bets_are_decisions() {
        assert!(LineOutcome::Win.is_decision());
        assert!(LineOutcome::Loss.is_decision());
        assert!(LineOutcome::Push.is_decision());
        assert!(!LineOutcome::PointEstablished(Point::SIX).is_decision());
        assert!(!LineOutcome::NoDecision.is_decision());
    }
}
