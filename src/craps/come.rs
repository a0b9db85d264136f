use std::collections::BTreeMap;

use crate::core::Point;

use super::config::OddsMode;

/// A single come bet that has traveled to its own point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComeBet {
    /// The flat come bet.
    pub stake: f64,
    /// The odds behind the come bet. This is zero until the roll after
    /// the come bet's point was established.
    pub odds_stake: f64,
}

impl ComeBet {
    /// Everything that's riding on this come bet.
    pub fn exposure(&self) -> f64 {
        self.stake + self.odds_stake
    }
}

/// All of the outstanding come bets, keyed by their point.
///
/// Because the bets are keyed by point there can never be more than one
/// come bet on a number.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComeLedger {
    bets: BTreeMap<Point, ComeBet>,
}

impl ComeLedger {
    /// Put a new come bet on `point` with no odds yet. Returns false and
    /// leaves the ledger alone if there's already a bet there.
    pub fn place(&mut self, point: Point, stake: f64) -> bool {
        if self.bets.contains_key(&point) {
            return false;
        }
        self.bets.insert(
            point,
            ComeBet {
                stake,
                odds_stake: 0.0,
            },
        );
        true
    }

    /// Take odds on every come bet that doesn't have them yet.
    ///
    /// Returns the points that got odds along with the odds stake.
    pub fn attach_odds(&mut self, odds_mode: OddsMode) -> Vec<(Point, f64)> {
        self.bets
            .iter_mut()
            .filter(|(_, bet)| bet.odds_stake == 0.0)
            .map(|(point, bet)| {
                bet.odds_stake = odds_mode.odds_stake(*point, bet.stake);
                (*point, bet.odds_stake)
            })
            .collect()
    }

    pub fn get(&self, point: Point) -> Option<&ComeBet> {
        self.bets.get(&point)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bets.contains_key(&point)
    }

    pub fn remove(&mut self, point: Point) -> Option<ComeBet> {
        self.bets.remove(&point)
    }

    /// Remove every bet, returning them in point order.
    pub fn drain(&mut self) -> Vec<(Point, ComeBet)> {
        std::mem::take(&mut self.bets).into_iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Point, &ComeBet)> {
        self.bets.iter()
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    /// The total of all stakes and odds in the ledger.
    pub fn exposure(&self) -> f64 {
        self.bets.values().map(ComeBet::exposure).sum()
    }
}
