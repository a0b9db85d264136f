//! craps_sim is a library for simulating craps betting strategies.
//!
//! It plays out the come-out and point phases of the pass line, don't pass
//! and a progressive come strategy, pays odds at true odds keyed by the
//! point, clamps every wager to the remaining bankroll and runs many
//! independent trials to tabulate how a bankroll fares.
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use craps_sim::craps::{BetType, CrapsConfig, OddsMode};
//! use craps_sim::simulation::SimulationRunnerBuilder;
//!
//! let config = CrapsConfig::default()
//!     .bet_type(BetType::DontPass)
//!     .odds_mode(OddsMode::Table345x)
//!     .num_trials(50)
//!     .rolls_per_trial(200);
//!
//! let mut runner = SimulationRunnerBuilder::default()
//!     .config(config)
//!     .rng(StdRng::seed_from_u64(420))
//!     .build()
//!     .unwrap();
//!
//! let outcome = runner.run();
//! assert_eq!(50, outcome.statistics.total_trials);
//! ```

/// Dice, points and errors. Everything in core is
/// agnostic to the betting strategy.
pub mod core;
/// The betting engine: configuration, payouts and the
/// come-out/point state machine.
pub mod craps;
/// Running many trials and tabulating the results.
pub mod simulation;
