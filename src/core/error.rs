use thiserror::Error;

/// This is the core error type for the
/// craps_sim library. It uses `thiserror` to provide
/// readable error messages
#[derive(Error, Debug)]
pub enum CrapsError {
    #[error("The pass line bet must be positive, found {0}")]
    NonPositiveStake(f64),
    #[error("The starting bankroll must be positive, found {0}")]
    NonPositiveBankroll(f64),
    #[error("A simulation needs at least one trial")]
    NoTrials,
    #[error("A trial needs at least one roll")]
    NoRolls,
    #[error("The {0} must be a finite number")]
    NonFiniteValue(&'static str),
    #[error("Unknown bet type: {0}")]
    UnknownBetType(String),
    #[error("Unknown odds multiplier: {0}")]
    UnknownOddsMode(String),
    #[error("Unknown don't pass odds table: {0}")]
    UnknownDontPassOdds(String),
    #[error("Die faces must be between 1 and 6, found {0}")]
    InvalidDieFace(u8),
    #[error("A replay dice roller needs at least one roll")]
    EmptyReplay,
    #[error("A simulation needs a configuration")]
    NeedConfig,
    #[cfg(feature = "serde")]
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("Unable to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
