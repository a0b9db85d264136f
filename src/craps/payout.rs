//! Odds payout tables.
//!
//! Line and come bets pay even money. Odds bets pay according to how
//! likely the point is to repeat before a seven, which depends on which
//! side of the point the bet is on.
use crate::core::Point;

use super::config::DontPassOdds;

/// Which side of the dice a bet is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BetSide {
    /// Wins when the point repeats.
    Do,
    /// Wins when a seven shows first.
    Dont,
}

/// The ratio paid on a winning odds bet. The winnings are
/// `odds_stake * ratio`; the stake itself is returned on top.
///
/// # Examples
///
/// ```
/// use craps_sim::core::Point;
/// use craps_sim::craps::{BetSide, DontPassOdds, odds_ratio};
///
/// assert_eq!(2.0, odds_ratio(Point::FOUR, BetSide::Do, DontPassOdds::Legacy));
/// assert_eq!(0.5, odds_ratio(Point::TEN, BetSide::Dont, DontPassOdds::Exact));
/// ```
pub fn odds_ratio(point: Point, side: BetSide, dont_pass_odds: DontPassOdds) -> f64 {
    match (side, point.value()) {
        (BetSide::Do, 4 | 10) => 2.0,
        (BetSide::Do, 5 | 9) => 1.5,
        (BetSide::Do, _) => 1.2,
        (BetSide::Dont, p) => match (dont_pass_odds, p) {
            (DontPassOdds::Legacy, 4 | 10) => 1.0,
            (DontPassOdds::Legacy, 5 | 9) => 0.667,
            (DontPassOdds::Legacy, _) => 0.833,
            (DontPassOdds::Exact, 4 | 10) => 1.0 / 2.0,
            (DontPassOdds::Exact, 5 | 9) => 2.0 / 3.0,
            (DontPassOdds::Exact, _) => 5.0 / 6.0,
        },
    }
}

/// The amount won by a winning odds bet of `odds_stake` on `point`.
pub fn odds_payout(
    point: Point,
    side: BetSide,
    odds_stake: f64,
    dont_pass_odds: DontPassOdds,
) -> f64 {
    odds_stake * odds_ratio(point, side, dont_pass_odds)
}
