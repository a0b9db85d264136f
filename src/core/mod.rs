//! This is the core module. It exports the pieces of craps that
//! don't depend on any betting strategy.

/// dice.rs has the dice and the sources of rolls.
mod dice;
/// Re-export the dice and the rollers.
pub use self::dice::{Dice, DiceRoller, ReplayDiceRoller, RngDiceRoller};

/// The box numbers that can become a point.
mod point;
/// Export `Point`
pub use self::point::Point;

/// Error types.
mod error;
/// Export `CrapsError`
pub use self::error::CrapsError;
