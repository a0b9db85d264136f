use std::fmt;
use std::str::FromStr;

use crate::core::{CrapsError, Point};

/// Which line the player bets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BetType {
    /// Bet with the shooter.
    #[default]
    Pass,
    /// Bet against the shooter. 12 on the come-out is a push.
    DontPass,
    /// Play the pass line and, once a point is set, put out a new
    /// come bet on every roll.
    ProgressiveCome,
}

impl BetType {
    /// Does this strategy bet with the shooter on the line
    pub fn is_pass_side(&self) -> bool {
        !matches!(self, BetType::DontPass)
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetType::Pass => write!(f, "pass"),
            BetType::DontPass => write!(f, "dontPass"),
            BetType::ProgressiveCome => write!(f, "progressiveCome"),
        }
    }
}

impl FromStr for BetType {
    type Err = CrapsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' ', '\''], "").as_str() {
            "pass" | "passline" => Ok(BetType::Pass),
            "dontpass" => Ok(BetType::DontPass),
            "progressivecome" | "come" => Ok(BetType::ProgressiveCome),
            _ => Err(CrapsError::UnknownBetType(s.to_string())),
        }
    }
}

/// How big the odds bet is compared to the line bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddsMode {
    /// Two times the line bet no matter the point.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "2x"))]
    Fixed2x,
    /// Three, four, and five times the line bet for
    /// 4/10, 5/9, and 6/8 respectively.
    #[cfg_attr(feature = "serde", serde(rename = "3-4-5x"))]
    Table345x,
}

impl OddsMode {
    /// The odds bet multiplier for a given point.
    pub fn multiplier(&self, point: Point) -> f64 {
        match self {
            OddsMode::Fixed2x => 2.0,
            OddsMode::Table345x => match point.value() {
                4 | 10 => 3.0,
                5 | 9 => 4.0,
                // 6 or 8. Point can't hold anything else.
                _ => 5.0,
            },
        }
    }

    /// The size of the odds bet that goes with a line (or come) bet
    /// of `stake` on `point`.
    pub fn odds_stake(&self, point: Point, stake: f64) -> f64 {
        stake * self.multiplier(point)
    }
}

impl fmt::Display for OddsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OddsMode::Fixed2x => write!(f, "2x"),
            OddsMode::Table345x => write!(f, "3-4-5x"),
        }
    }
}

impl FromStr for OddsMode {
    type Err = CrapsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '/', ' '], "").as_str() {
            "2x" | "2" | "fixed2x" => Ok(OddsMode::Fixed2x),
            "345x" | "345" | "table345x" => Ok(OddsMode::Table345x),
            _ => Err(CrapsError::UnknownOddsMode(s.to_string())),
        }
    }
}

/// The payout table used for don't pass odds.
///
/// True odds for laying against a point are 1:2, 2:3, and 5:6. The
/// legacy table pays 1, 0.667, and 0.833 times the lay instead, which is
/// what older results were produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DontPassOdds {
    #[default]
    Legacy,
    Exact,
}

impl fmt::Display for DontPassOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DontPassOdds::Legacy => write!(f, "legacy"),
            DontPassOdds::Exact => write!(f, "exact"),
        }
    }
}

impl FromStr for DontPassOdds {
    type Err = CrapsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(DontPassOdds::Legacy),
            "exact" | "true" => Ok(DontPassOdds::Exact),
            _ => Err(CrapsError::UnknownDontPassOdds(s.to_string())),
        }
    }
}

/// Everything needed to run a simulation. This doesn't
/// change for the length of a run.
///
/// The setters consume and return the config so they can be
/// chained.
///
/// # Examples
///
/// ```
/// use craps_sim::craps::{BetType, CrapsConfig, OddsMode};
///
/// let config = CrapsConfig::default()
///     .bet_type(BetType::ProgressiveCome)
///     .pass_line_bet(25.0)
///     .odds_mode(OddsMode::Table345x)
///     .starting_bankroll(5_000.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct CrapsConfig {
    pub bet_type: BetType,
    pub pass_line_bet: f64,
    pub odds_mode: OddsMode,
    pub starting_bankroll: f64,
    pub num_trials: usize,
    pub rolls_per_trial: usize,
    pub dont_pass_odds: DontPassOdds,
}

impl Default for CrapsConfig {
    fn default() -> Self {
        Self {
            bet_type: BetType::Pass,
            pass_line_bet: 10.0,
            odds_mode: OddsMode::Fixed2x,
            starting_bankroll: 1_000.0,
            num_trials: 1,
            rolls_per_trial: 100,
            dont_pass_odds: DontPassOdds::Legacy,
        }
    }
}

impl CrapsConfig {
    pub fn new(
        bet_type: BetType,
        pass_line_bet: f64,
        odds_mode: OddsMode,
        starting_bankroll: f64,
        num_trials: usize,
        rolls_per_trial: usize,
    ) -> Self {
        Self {
            bet_type,
            pass_line_bet,
            odds_mode,
            starting_bankroll,
            num_trials,
            rolls_per_trial,
            dont_pass_odds: DontPassOdds::default(),
        }
    }

    pub fn bet_type(mut self, bet_type: BetType) -> Self {
        self.bet_type = bet_type;
        self
    }

    pub fn pass_line_bet(mut self, pass_line_bet: f64) -> Self {
        self.pass_line_bet = pass_line_bet;
        self
    }

    pub fn odds_mode(mut self, odds_mode: OddsMode) -> Self {
        self.odds_mode = odds_mode;
        self
    }

    pub fn starting_bankroll(mut self, starting_bankroll: f64) -> Self {
        self.starting_bankroll = starting_bankroll;
        self
    }

    pub fn num_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    pub fn rolls_per_trial(mut self, rolls_per_trial: usize) -> Self {
        self.rolls_per_trial = rolls_per_trial;
        self
    }

    pub fn dont_pass_odds(mut self, dont_pass_odds: DontPassOdds) -> Self {
        self.dont_pass_odds = dont_pass_odds;
        self
    }

    /// Check that the configuration can be simulated.
    ///
    /// Money values have to be finite and positive, and there has to be at
    /// least one trial of at least one roll.
    pub fn validate(&self) -> Result<(), CrapsError> {
        if !self.pass_line_bet.is_finite() {
            return Err(CrapsError::NonFiniteValue("pass line bet"));
        }
        if !self.starting_bankroll.is_finite() {
            return Err(CrapsError::NonFiniteValue("starting bankroll"));
        }
        if self.pass_line_bet <= 0.0 {
            return Err(CrapsError::NonPositiveStake(self.pass_line_bet));
        }
        if self.starting_bankroll <= 0.0 {
            return Err(CrapsError::NonPositiveBankroll(self.starting_bankroll));
        }
        if self.num_trials == 0 {
            return Err(CrapsError::NoTrials);
        }
        if self.rolls_per_trial == 0 {
            return Err(CrapsError::NoRolls);
        }
        Ok(())
    }

    /// Parse a JSON configuration and validate it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, CrapsError> {
        let config: CrapsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file and validate it.
    #[cfg(feature = "serde")]
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, CrapsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CrapsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_stake() {
        for stake in [0.0, -10.0] {
            let config = CrapsConfig::default().pass_line_bet(stake);
            assert!(matches!(
                config.validate(),
                Err(CrapsError::NonPositiveStake(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_positive_bankroll() {
        let config = CrapsConfig::default().starting_bankroll(0.0);
        assert!(matches!(
            config.validate(),
            Err(CrapsError::NonPositiveBankroll(_))
        ));
    }

    #[test]
    fn test_rejects_zero_counts() {
        assert!(matches!(
            CrapsConfig::default().num_trials(0).validate(),
            Err(CrapsError::NoTrials)
        ));
        assert!(matches!(
            CrapsConfig::default().rolls_per_trial(0).validate(),
            Err(CrapsError::NoRolls)
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            CrapsConfig::default().pass_line_bet(f64::NAN).validate(),
            Err(CrapsError::NonFiniteValue(_))
        ));
        assert!(matches!(
            CrapsConfig::default()
                .starting_bankroll(f64::INFINITY)
                .validate(),
            Err(CrapsError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn test_multipliers() {
        for point in Point::ALL {
            assert_eq!(2.0, OddsMode::Fixed2x.multiplier(point));
        }
        assert_eq!(3.0, OddsMode::Table345x.multiplier(Point::FOUR));
        assert_eq!(3.0, OddsMode::Table345x.multiplier(Point::TEN));
        assert_eq!(4.0, OddsMode::Table345x.multiplier(Point::FIVE));
        assert_eq!(4.0, OddsMode::Table345x.multiplier(Point::NINE));
        assert_eq!(5.0, OddsMode::Table345x.multiplier(Point::SIX));
        assert_eq!(5.0, OddsMode::Table345x.multiplier(Point::EIGHT));
        assert_eq!(100.0, OddsMode::Table345x.odds_stake(Point::SIX, 20.0));
    }

    #[test]
    fn test_parse_bet_types() {
        assert_eq!(BetType::Pass, "pass".parse().unwrap());
        assert_eq!(BetType::DontPass, "dontPass".parse().unwrap());
        assert_eq!(BetType::DontPass, "don't-pass".parse().unwrap());
        assert_eq!(
            BetType::ProgressiveCome,
            "progressive-come".parse().unwrap()
        );
        assert!("field".parse::<BetType>().is_err());

        for bet_type in [BetType::Pass, BetType::DontPass, BetType::ProgressiveCome] {
            assert_eq!(bet_type, bet_type.to_string().parse().unwrap());
        }
    }

    #[test]
    fn test_parse_odds_modes() {
        assert_eq!(OddsMode::Fixed2x, "2x".parse().unwrap());
        assert_eq!(OddsMode::Table345x, "3-4-5x".parse().unwrap());
        assert_eq!(OddsMode::Table345x, "3/4/5x".parse().unwrap());
        assert!("10x".parse::<OddsMode>().is_err());
        assert_eq!(DontPassOdds::Exact, "exact".parse().unwrap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let config = CrapsConfig::from_json(
            r#"{
                "betType": "progressiveCome",
                "passLineBet": 15,
                "oddsMode": "3-4-5x",
                "startingBankroll": 500,
                "numTrials": 20,
                "rollsPerTrial": 50
            }"#,
        )
        .unwrap();

        assert_eq!(BetType::ProgressiveCome, config.bet_type);
        assert_eq!(15.0, config.pass_line_bet);
        assert_eq!(OddsMode::Table345x, config.odds_mode);
        assert_eq!(500.0, config.starting_bankroll);
        assert_eq!(20, config.num_trials);
        assert_eq!(50, config.rolls_per_trial);
        assert_eq!(DontPassOdds::Legacy, config.dont_pass_odds);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_validates() {
        let result = CrapsConfig::from_json(r#"{"startingBankroll": -5}"#);
        assert!(matches!(result, Err(CrapsError::NonPositiveBankroll(_))));

        let result = CrapsConfig::from_json("not json");
        assert!(matches!(result, Err(CrapsError::ConfigParse(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"betType": "dontPass", "numTrials": 3}}"#).unwrap();

        let config = CrapsConfig::from_file(file.path()).unwrap();
        assert_eq!(BetType::DontPass, config.bet_type);
        assert_eq!(3, config.num_trials);
        assert_eq!(10.0, config.pass_line_bet);

        let missing = CrapsConfig::from_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(CrapsError::IOError(_))));
    }
}
