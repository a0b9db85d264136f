use tracing::event;

use crate::core::{CrapsError, Dice, DiceRoller, Point};

use super::come::ComeLedger;
use super::config::{BetType, CrapsConfig};
use super::payout::{BetSide, odds_payout};
use super::record::{ComeEvent, LineOutcome, RollRecord};

/// The state of a single trial. This is created fresh for
/// every trial and mutated by every roll.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BettingState {
    /// The current point. `None` means the next roll is a come-out roll.
    pub point: Option<Point>,
    pub starting_bankroll: f64,
    pub bankroll: f64,
    /// Net result of the trial so far.
    pub running_total: f64,
    pub max_bankroll: f64,
    pub min_bankroll: f64,
    /// Outstanding come bets for the progressive come strategy.
    pub come_bets: ComeLedger,
    /// Set once the bankroll hits zero and never cleared.
    pub ruin_reached: bool,
    /// The sum of every roll's wager.
    pub total_wagered: f64,
    /// How many rolls have been resolved.
    pub rolls: usize,
}

impl BettingState {
    pub fn new(starting_bankroll: f64) -> Self {
        Self {
            point: None,
            starting_bankroll,
            bankroll: starting_bankroll,
            running_total: 0.0,
            max_bankroll: starting_bankroll,
            min_bankroll: starting_bankroll,
            come_bets: ComeLedger::default(),
            ruin_reached: false,
            total_wagered: 0.0,
            rolls: 0,
        }
    }

    /// Come-out is exactly the absence of a point.
    pub fn is_come_out(&self) -> bool {
        self.point.is_none()
    }
}

/// A wager after it has been fit into the bankroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedWager {
    /// What is actually at risk on the roll.
    pub wager: f64,
    /// What every part of the intended bet gets multiplied by.
    pub scale: f64,
    pub clamped: bool,
}

impl ClampedWager {
    /// Scale one part of the intended bet.
    pub fn scaled(&self, nominal: f64) -> f64 {
        nominal * self.scale
    }
}

/// Fit an intended wager into the bankroll.
///
/// If the intended wager is more than the bankroll then the whole bankroll
/// is bet instead, and every part of the bet is scaled down by the same
/// factor so the line, odds, and come bets keep their proportions.
///
/// # Examples
///
/// ```
/// use craps_sim::craps::clamp_wager;
///
/// let full = clamp_wager(30.0, 100.0);
/// assert_eq!(30.0, full.wager);
/// assert!(!full.clamped);
///
/// let clamped = clamp_wager(60.0, 15.0);
/// assert_eq!(15.0, clamped.wager);
/// assert_eq!(5.0, clamped.scaled(20.0));
/// assert_eq!(10.0, clamped.scaled(40.0));
/// ```
pub fn clamp_wager(intended: f64, bankroll: f64) -> ClampedWager {
    if intended > bankroll {
        ClampedWager {
            wager: bankroll,
            scale: bankroll / intended,
            clamped: true,
        }
    } else {
        ClampedWager {
            wager: intended,
            scale: 1.0,
            clamped: false,
        }
    }
}

/// Decide the line bet for a roll.
///
/// `point` is the point before the roll. ProgressiveCome plays the
/// `BetSide::Do` line.
pub fn line_outcome(point: Option<Point>, side: BetSide, total: u8) -> LineOutcome {
    match point {
        None => match (side, total) {
            (BetSide::Do, 7 | 11) | (BetSide::Dont, 2 | 3) => LineOutcome::Win,
            (BetSide::Do, 2 | 3 | 12) | (BetSide::Dont, 7 | 11) => LineOutcome::Loss,
            (BetSide::Dont, 12) => LineOutcome::Push,
            _ => Point::from_total(total)
                .map_or(LineOutcome::NoDecision, LineOutcome::PointEstablished),
        },
        Some(p) if p.is_hit(total) => match side {
            BetSide::Do => LineOutcome::Win,
            BetSide::Dont => LineOutcome::Loss,
        },
        Some(_) if total == 7 => match side {
            BetSide::Do => LineOutcome::Loss,
            BetSide::Dont => LineOutcome::Win,
        },
        Some(_) => LineOutcome::NoDecision,
    }
}

fn line_label(point: Option<Point>, outcome: LineOutcome, side: BetSide) -> String {
    match (point, outcome, side) {
        (_, LineOutcome::PointEstablished(p), _) => format!("Point {p} Established"),
        (_, LineOutcome::Push, _) => "Don't Pass Push (12)".to_string(),
        (None, LineOutcome::Win, BetSide::Do) => "Pass Line Win".to_string(),
        (None, LineOutcome::Loss, BetSide::Do) => "Pass Line Loss".to_string(),
        (None, LineOutcome::Win, BetSide::Dont) => "Don't Pass Win".to_string(),
        (None, LineOutcome::Loss, BetSide::Dont) => "Don't Pass Loss".to_string(),
        (Some(p), LineOutcome::Win, BetSide::Do) => format!("Point {p} Hit - Pass Line Win"),
        (Some(_), LineOutcome::Loss, BetSide::Do) => "Seven Out - Pass Line Loss".to_string(),
        (Some(_), LineOutcome::Win, BetSide::Dont) => "Seven Out - Don't Pass Win".to_string(),
        (Some(p), LineOutcome::Loss, BetSide::Dont) => {
            format!("Point {p} Hit - Don't Pass Loss")
        }
        (Some(p), LineOutcome::NoDecision, _) => format!("Point {p} - No Decision"),
        (None, LineOutcome::NoDecision, _) => "No Decision".to_string(),
    }
}

// Running totals for settling a roll. Each bet on the table is one
// component; a component that loses is counted so that a roll where
// everything loses costs exactly the wager.
#[derive(Debug, Default)]
struct Settlement {
    won: f64,
    lost: f64,
    components: usize,
    losers: usize,
}

impl Settlement {
    fn win(&mut self, amount: f64) {
        self.won += amount;
    }

    fn lose(&mut self, amount: f64) {
        self.lost += amount;
        self.losers += 1;
    }

    /// The final `(won, lost)` pair. Losses can never be more than the
    /// wager, and a clean sweep loses the wager to the cent.
    fn totals(&self, wager: f64) -> (f64, f64) {
        let lost = if self.components > 0 && self.losers == self.components {
            wager
        } else {
            self.lost.min(wager)
        };
        (self.won, lost)
    }
}

/// The betting engine for a single trial.
///
/// It owns the betting state, turns each roll of the dice into a
/// `RollRecord`, and moves the game between the come-out and point phases.
///
/// # Examples
///
/// ```
/// use craps_sim::core::Dice;
/// use craps_sim::craps::{BettingEngine, CrapsConfig};
///
/// let mut engine = BettingEngine::new(CrapsConfig::default()).unwrap();
///
/// // Point of four
/// let record = engine.resolve_roll(Dice::new(2, 2).unwrap());
/// assert_eq!("Point 4 Established", record.description);
///
/// // Four again pays the line at even money and the 2x odds at 2:1
/// let record = engine.resolve_roll(Dice::new(1, 3).unwrap());
/// assert_eq!(50.0, record.win_loss);
/// assert_eq!(1_050.0, engine.state().bankroll);
/// ```
#[derive(Debug, Clone)]
pub struct BettingEngine {
    config: CrapsConfig,
    state: BettingState,
}

impl BettingEngine {
    /// Create a new engine for the configuration. The configuration is
    /// validated first.
    pub fn new(config: CrapsConfig) -> Result<Self, CrapsError> {
        config.validate()?;
        let state = BettingState::new(config.starting_bankroll);
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &CrapsConfig {
        &self.config
    }

    pub fn state(&self) -> &BettingState {
        &self.state
    }

    /// Start a fresh trial.
    pub fn reset(&mut self) {
        self.state = BettingState::new(self.config.starting_bankroll);
    }

    /// A trial is over once the bankroll is gone.
    pub fn is_finished(&self) -> bool {
        self.state.ruin_reached
    }

    fn side(&self) -> BetSide {
        if self.config.bet_type.is_pass_side() {
            BetSide::Do
        } else {
            BetSide::Dont
        }
    }

    /// Roll the dice from `roller` and resolve them.
    pub fn roll<D: DiceRoller + ?Sized>(&mut self, roller: &mut D) -> RollRecord {
        let dice = roller.roll();
        self.resolve_roll(dice)
    }

    /// Resolve one roll of the dice: size the wager, settle every bet on
    /// the table, and advance the state machine.
    ///
    /// # Panics
    ///
    /// Panics if settling would leave a negative bankroll. The wager clamp
    /// makes that impossible, so a panic here is a bug in the payout math.
    pub fn resolve_roll(&mut self, dice: Dice) -> RollRecord {
        let total = dice.total();
        let side = self.side();
        let stake = self.config.pass_line_bet;
        let progressive = self.config.bet_type == BetType::ProgressiveCome;
        let point_before = self.state.point;
        let bankroll_before = self.state.bankroll;

        let mut come_events = vec![];

        // Come bets established on an earlier roll take their odds before
        // the dice land.
        if progressive {
            for (point, odds_stake) in self.state.come_bets.attach_odds(self.config.odds_mode) {
                come_events.push(ComeEvent::OddsAttached { point, odds_stake });
            }
        }

        let outcome = line_outcome(point_before, side, total);
        let line_odds = point_before.map_or(0.0, |p| self.config.odds_mode.odds_stake(p, stake));
        let next_point = match outcome {
            LineOutcome::PointEstablished(p) => Some(p),
            LineOutcome::NoDecision => point_before,
            _ => None,
        };

        let rolled_point = Point::from_total(total);
        let come_hit = rolled_point.filter(|p| self.state.come_bets.contains(*p));
        // A come bet that was hit comes down first, so its number is open
        // again. Nothing is placed on the main point or once the line bet
        // has been decided.
        let new_come = progressive && next_point.is_some_and(|p| !p.is_hit(total));

        let intended = stake
            + line_odds
            + self.state.come_bets.exposure()
            + if new_come { stake } else { 0.0 };
        let clamp = clamp_wager(intended, bankroll_before);
        if clamp.clamped {
            event!(
                tracing::Level::DEBUG,
                intended,
                wager = clamp.wager,
                "Wager clamped to the remaining bankroll"
            );
        }

        let mut settlement = Settlement {
            components: 1 + usize::from(line_odds > 0.0) + self.state.come_bets.len(),
            ..Default::default()
        };

        match outcome {
            LineOutcome::Win => {
                settlement.win(clamp.scaled(stake));
                if let Some(point) = point_before {
                    settlement.win(odds_payout(
                        point,
                        side,
                        clamp.scaled(line_odds),
                        self.config.dont_pass_odds,
                    ));
                }
            }
            LineOutcome::Loss => {
                settlement.lose(clamp.scaled(stake));
                if line_odds > 0.0 {
                    settlement.lose(clamp.scaled(line_odds));
                }
            }
            LineOutcome::Push | LineOutcome::PointEstablished(_) | LineOutcome::NoDecision => {}
        }

        if let Some((point, bet)) =
            come_hit.and_then(|p| self.state.come_bets.remove(p).map(|bet| (p, bet)))
        {
            let amount = clamp.scaled(bet.stake)
                + odds_payout(
                    point,
                    BetSide::Do,
                    clamp.scaled(bet.odds_stake),
                    self.config.dont_pass_odds,
                );
            settlement.win(amount);
            come_events.push(ComeEvent::PointWin { point, amount });
        }

        if total == 7 && !self.state.come_bets.is_empty() {
            let lost = self.state.come_bets.drain();
            let mut amount = 0.0;
            for (_, bet) in lost.iter() {
                let bet_loss = clamp.scaled(bet.exposure());
                settlement.lose(bet_loss);
                amount += bet_loss;
            }
            come_events.push(ComeEvent::SevenOut {
                bets: lost.len(),
                amount,
            });
        }

        if new_come {
            settlement.components += 1;
            let amount = clamp.scaled(stake);
            match (total, rolled_point) {
                (7 | 11, _) => {
                    settlement.win(amount);
                    come_events.push(ComeEvent::ImmediateWin { total, amount });
                }
                (2 | 3 | 12, _) => {
                    settlement.lose(amount);
                    come_events.push(ComeEvent::ImmediateLoss { total, amount });
                }
                (_, Some(point)) => {
                    if self.state.come_bets.place(point, stake) {
                        come_events.push(ComeEvent::Placed { point, stake });
                    }
                }
                (_, None) => {}
            }
        }

        let (won, lost) = settlement.totals(clamp.wager);
        let bankroll = (bankroll_before + won) - lost;
        assert!(
            bankroll >= 0.0,
            "Bankroll went negative ({bankroll}) settling a roll of {total}"
        );

        self.state.point = next_point;
        self.state.bankroll = bankroll;
        self.state.running_total = bankroll - self.state.starting_bankroll;
        self.state.max_bankroll = self.state.max_bankroll.max(bankroll);
        self.state.min_bankroll = self.state.min_bankroll.min(bankroll);
        self.state.total_wagered += clamp.wager;
        self.state.rolls += 1;
        if bankroll == 0.0 && !self.state.ruin_reached {
            self.state.ruin_reached = true;
            event!(
                tracing::Level::DEBUG,
                roll = self.state.rolls,
                "Bankroll is gone"
            );
        }

        let mut description = line_label(point_before, outcome, side);
        if clamp.clamped {
            description.push_str(" (Adjusted Bet)");
        }
        let come_labels: Vec<String> = come_events.iter().filter_map(ComeEvent::label).collect();
        if !come_labels.is_empty() {
            description.push_str(" - ");
            description.push_str(&come_labels.join(", "));
        }
        if self.state.ruin_reached {
            description.push_str(" - RUIN!");
        }

        RollRecord {
            roll_number: self.state.rolls,
            dice,
            total,
            wager: clamp.wager,
            win_loss: won - lost,
            running_total: self.state.running_total,
            bankroll,
            description,
            line_outcome: outcome,
            come_events,
            point: next_point,
            was_come_out: point_before.is_none(),
            point_established: matches!(outcome, LineOutcome::PointEstablished(_)),
            clamped: clamp.clamped,
            ruin: self.state.ruin_reached,
        }
    }
}
