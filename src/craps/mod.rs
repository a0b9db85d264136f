//! The craps betting engine.
//!
//! `BettingEngine` owns the state of one trial and resolves a roll at a
//! time. Everything it needs to know about the bets is in `CrapsConfig`,
//! and everything it reports is in the returned `RollRecord`.
//!
//! ```
//! use craps_sim::core::ReplayDiceRoller;
//! use craps_sim::craps::{BetType, BettingEngine, CrapsConfig, LineOutcome};
//!
//! let config = CrapsConfig::default().bet_type(BetType::DontPass);
//! let mut engine = BettingEngine::new(config).unwrap();
//! let mut dice = ReplayDiceRoller::from_pairs(&[(6, 6)]).unwrap();
//!
//! let record = engine.roll(&mut dice);
//! assert_eq!(LineOutcome::Push, record.line_outcome);
//! assert_eq!(1_000.0, record.bankroll);
//! ```
mod come;
mod config;
mod engine;
mod payout;
mod record;

pub use come::{ComeBet, ComeLedger};
pub use config::{BetType, CrapsConfig, DontPassOdds, OddsMode};
pub use engine::{BettingEngine, BettingState, ClampedWager, clamp_wager, line_outcome};
pub use payout::{BetSide, odds_payout, odds_ratio};
pub use record::{ComeEvent, LineOutcome, RollRecord};
