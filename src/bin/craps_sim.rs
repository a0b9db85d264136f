//! Run a craps betting simulation from the command line.
//!
//! Usage:
//!   craps-sim --bet-type dontPass --odds 345x --trials 1000 --rolls 200
//!   craps-sim --config strategy.json --seed 42 --json

use std::path::PathBuf;

use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

use craps_sim::core::CrapsError;
use craps_sim::craps::{BetType, CrapsConfig, DontPassOdds, OddsMode};
use craps_sim::simulation::{SimulationOutcome, SimulationRunnerBuilder, TrialHistory};

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate craps betting strategies")]
struct Args {
    /// JSON configuration to start from. Any other flag overrides it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// pass, dontPass or progressiveCome
    #[arg(short, long)]
    bet_type: Option<BetType>,

    /// The pass line (or don't pass) bet
    #[arg(short, long)]
    stake: Option<f64>,

    /// 2x or 3-4-5x
    #[arg(short, long)]
    odds: Option<OddsMode>,

    #[arg(long)]
    bankroll: Option<f64>,

    #[arg(short, long)]
    trials: Option<usize>,

    /// The most rolls a single trial can make
    #[arg(short, long)]
    rolls: Option<usize>,

    /// Seed the dice for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// legacy or exact
    #[arg(long)]
    dont_pass_odds: Option<DontPassOdds>,

    /// Print the whole outcome as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn craps_config(&self) -> Result<CrapsConfig, CrapsError> {
        let mut config = match &self.config {
            Some(path) => CrapsConfig::from_file(path)?,
            None => CrapsConfig::default(),
        };
        if let Some(bet_type) = self.bet_type {
            config = config.bet_type(bet_type);
        }
        if let Some(stake) = self.stake {
            config = config.pass_line_bet(stake);
        }
        if let Some(odds) = self.odds {
            config = config.odds_mode(odds);
        }
        if let Some(bankroll) = self.bankroll {
            config = config.starting_bankroll(bankroll);
        }
        if let Some(trials) = self.trials {
            config = config.num_trials(trials);
        }
        if let Some(rolls) = self.rolls {
            config = config.rolls_per_trial(rolls);
        }
        if let Some(dont_pass_odds) = self.dont_pass_odds {
            config = config.dont_pass_odds(dont_pass_odds);
        }
        Ok(config)
    }
}

fn print_history(history: &TrialHistory) {
    println!("Trial {} rolls", history.result.trial_number);
    println!(
        "{:>5}  {:>6}  {:>5}  {:>10}  {:>10}  {:>10}  Outcome",
        "Roll", "Dice", "Total", "Wager", "Win/Loss", "Bankroll"
    );
    for roll in &history.rolls {
        println!(
            "{:>5}  {:>6}  {:>5}  {:>10.2}  {:>10.2}  {:>10.2}  {}",
            roll.roll_number,
            roll.dice.to_string(),
            roll.total,
            roll.wager,
            roll.win_loss,
            roll.bankroll,
            roll.description
        );
    }
}

fn print_outcome(config: &CrapsConfig, outcome: &SimulationOutcome) {
    println!(
        "{} ${:.2} with {} odds, ${:.2} bankroll, {} rolls per trial",
        config.bet_type,
        config.pass_line_bet,
        config.odds_mode,
        config.starting_bankroll,
        config.rolls_per_trial
    );
    if config.bet_type == BetType::DontPass {
        println!("Don't pass odds table: {}", config.dont_pass_odds);
    }
    println!();
    println!("{}", outcome.statistics);
    if outcome.cancelled {
        println!("Cancelled after {} trials", outcome.trials.len());
    }

    if let Some(history) = outcome.first_history() {
        println!();
        print_history(history);
    }

    println!();
    println!(
        "{:>6}  {:>6}  {:>12}  {:>12}  {:>12}  Ruin",
        "Trial", "Rolls", "Profit/Loss", "Max", "Min"
    );
    for trial in &outcome.trials {
        println!(
            "{:>6}  {:>6}  {:>12.2}  {:>12.2}  {:>12.2}  {}",
            trial.trial_number,
            trial.rolls,
            trial.profit_loss,
            trial.max_bankroll,
            trial.min_bankroll,
            if trial.ended_in_ruin { "yes" } else { "no" }
        );
    }
}

fn main() -> Result<(), CrapsError> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = args.craps_config()?;
    let builder = SimulationRunnerBuilder::default().config(config.clone());
    let builder = match args.seed {
        Some(seed) => builder.rng(StdRng::seed_from_u64(seed)),
        None => builder,
    };
    let mut runner = builder.build()?;
    let outcome = runner.run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&config, &outcome);
    }
    Ok(())
}
