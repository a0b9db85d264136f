use std::sync::{Arc, atomic::AtomicBool};

use rand::Rng;

use crate::core::{CrapsError, DiceRoller, RngDiceRoller};
use crate::craps::{BettingEngine, CrapsConfig};

use super::historian::Historian;
use super::runner::{HistoryRetention, SimulationRunner};

/// # SimulationRunnerBuilder
///
/// `SimulationRunnerBuilder` is a builder to allow for complex
/// configurations of a craps simulation. A configuration is required,
/// other fields are optional.
///
/// ## Setters
///
/// Each setter will set the optional value to the passed in value. Then
/// return the mutated builder.
///
/// Without an rng or a dice roller the dice are thrown with the
/// thread rng.
///
/// ## Examples
///
/// ```
/// use craps_sim::craps::CrapsConfig;
/// use craps_sim::simulation::SimulationRunnerBuilder;
///
/// let runner = SimulationRunnerBuilder::default()
///     .config(CrapsConfig::default())
///     .build()
///     .unwrap();
/// ```
///
/// However sometimes you want a known but random run. In that case you
/// can pass in the rng like this:
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use craps_sim::craps::CrapsConfig;
/// use craps_sim::simulation::{HistoryRetention, SimulationRunnerBuilder};
///
/// let rng = StdRng::seed_from_u64(420);
/// let runner = SimulationRunnerBuilder::default()
///     .config(CrapsConfig::default().num_trials(10))
///     .rng(rng)
///     .retention(HistoryRetention::All)
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct SimulationRunnerBuilder {
    config: Option<CrapsConfig>,
    dice: Option<Box<dyn DiceRoller>>,
    historians: Vec<Box<dyn Historian>>,
    retention: HistoryRetention,
    cancel: Option<Arc<AtomicBool>>,
    panic_on_historian_error: bool,
}

impl SimulationRunnerBuilder {
    /// Set the configuration for the runner created by this builder.
    pub fn config(mut self, config: CrapsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Throw the dice with this rng. Replaces any dice roller set before.
    pub fn rng<R: Rng + 'static>(mut self, rng: R) -> Self {
        self.dice = Some(Box::new(RngDiceRoller::new(rng)));
        self
    }

    /// Use this dice roller for every roll. Replaces any rng set before.
    pub fn dice<D: DiceRoller + 'static>(mut self, dice: D) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Set the historians for the runner created by this builder.
    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    pub fn retention(mut self, retention: HistoryRetention) -> Self {
        self.retention = retention;
        self
    }

    /// A flag that stops the run between trials once it is set.
    pub fn cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Sets whether the runner should panic if a historian errors rather
    /// than dropping the historian.
    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    /// Given the fields already specified build any that are not specified
    /// and create a new SimulationRunner.
    ///
    /// Returns `CrapsError::NeedConfig` if no configuration was given, or the
    /// validation error if the configuration is invalid.
    pub fn build(self) -> Result<SimulationRunner, CrapsError> {
        let config = self.config.ok_or(CrapsError::NeedConfig)?;
        let engine = BettingEngine::new(config)?;
        let dice: Box<dyn DiceRoller> = match self.dice {
            Some(dice) => dice,
            None => Box::new(RngDiceRoller::default()),
        };

        Ok(SimulationRunner {
            engine,
            dice,
            historians: self.historians,
            retention: self.retention,
            cancel: self.cancel,
            panic_on_historian_error: self.panic_on_historian_error,
        })
    }
}
