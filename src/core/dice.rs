use std::fmt;

use rand::{Rng, rngs::ThreadRng};

use super::CrapsError;

/// The two dice of a single roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DiceFaces"))]
pub struct Dice {
    die1: u8,
    die2: u8,
}

// Unchecked faces as they come off the wire.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct DiceFaces {
    die1: u8,
    die2: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<DiceFaces> for Dice {
    type Error = CrapsError;

    fn try_from(faces: DiceFaces) -> Result<Self, Self::Error> {
        Dice::new(faces.die1, faces.die2)
    }
}

impl Dice {
    /// Create a new pair of dice checking that each face is in 1..=6
    pub fn new(die1: u8, die2: u8) -> Result<Self, CrapsError> {
        for face in [die1, die2] {
            if !(1..=6).contains(&face) {
                return Err(CrapsError::InvalidDieFace(face));
            }
        }
        Ok(Self { die1, die2 })
    }

    pub fn die1(&self) -> u8 {
        self.die1
    }

    pub fn die2(&self) -> u8 {
        self.die2
    }

    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.die1, self.die2)
    }
}

/// Anything that can throw a pair of dice.
///
/// The simulation never creates randomness on its own. It asks a
/// `DiceRoller` for every roll so that runs can be made reproducible
/// by seeding the rng or by replaying a fixed sequence.
pub trait DiceRoller {
    fn roll(&mut self) -> Dice;
}

/// Rolls two independent uniform dice using any `rand::Rng`.
#[derive(Debug, Clone)]
pub struct RngDiceRoller<R: Rng> {
    rng: R,
}

impl<R: Rng> RngDiceRoller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RngDiceRoller<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> DiceRoller for RngDiceRoller<R> {
    fn roll(&mut self) -> Dice {
        Dice {
            die1: self.rng.random_range(1..=6),
            die2: self.rng.random_range(1..=6),
        }
    }
}

/// A dice roller that replays a fixed sequence of rolls.
/// Once the sequence is exhausted it starts again from the
/// beginning.
#[derive(Debug, Clone)]
pub struct ReplayDiceRoller {
    rolls: Vec<Dice>,
    idx: usize,
}

impl ReplayDiceRoller {
    pub fn new(rolls: Vec<Dice>) -> Result<Self, CrapsError> {
        if rolls.is_empty() {
            return Err(CrapsError::EmptyReplay);
        }
        Ok(Self { rolls, idx: 0 })
    }

    /// Build a replay roller from `(die1, die2)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use craps_sim::core::{DiceRoller, ReplayDiceRoller};
    ///
    /// let mut dice = ReplayDiceRoller::from_pairs(&[(3, 4), (2, 2)]).unwrap();
    /// assert_eq!(7, dice.roll().total());
    /// assert_eq!(4, dice.roll().total());
    /// assert_eq!(7, dice.roll().total());
    /// ```
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Result<Self, CrapsError> {
        let rolls = pairs
            .iter()
            .map(|(d1, d2)| Dice::new(*d1, *d2))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rolls)
    }
}

impl DiceRoller for ReplayDiceRoller {
    fn roll(&mut self) -> Dice {
        let dice = self.rolls[self.idx];
        self.idx = (self.idx + 1) % self.rolls.len();
        dice
    }
}

impl<D: DiceRoller + ?Sized> DiceRoller for Box<D> {
    fn roll(&mut self) -> Dice {
        (**self).roll()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_dice_faces_are_checked() {
        assert!(Dice::new(1, 6).is_ok());
        assert!(matches!(
            Dice::new(0, 3),
            Err(CrapsError::InvalidDieFace(0))
        ));
        assert!(matches!(
            Dice::new(4, 7),
            Err(CrapsError::InvalidDieFace(7))
        ));
    }

    #[test]
    fn test_rng_roller_stays_in_range() {
        let mut roller = RngDiceRoller::new(StdRng::seed_from_u64(420));
        let mut seen = [false; 13];
        for _ in 0..10_000 {
            let dice = roller.roll();
            assert!((1..=6).contains(&dice.die1()));
            assert!((1..=6).contains(&dice.die2()));
            seen[dice.total() as usize] = true;
        }
        // Every total from 2 to 12 shows up eventually
        assert!(seen[2..].iter().all(|s| *s));
    }

    #[test]
    fn test_seeded_rollers_agree() {
        let mut a = RngDiceRoller::new(StdRng::seed_from_u64(7));
        let mut b = RngDiceRoller::new(StdRng::seed_from_u64(7));
        for _ in 0..100 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_seven_is_most_common() {
        let mut roller = RngDiceRoller::new(StdRng::seed_from_u64(1));
        let mut counts = [0usize; 13];
        for _ in 0..36_000 {
            counts[roller.roll().total() as usize] += 1;
        }
        let max_total = (2..=12).max_by_key(|t| counts[*t]).unwrap();
        assert_eq!(7, max_total);
    }

    #[test]
    fn test_replay_cycles() {
        let mut roller = ReplayDiceRoller::from_pairs(&[(1, 1), (6, 6)]).unwrap();
        let totals: Vec<u8> = (0..5).map(|_| roller.roll().total()).collect();
        assert_eq!(vec![2, 12, 2, 12, 2], totals);
    }

    #[test]
    fn test_empty_replay_rejected() {
        assert!(matches!(
            ReplayDiceRoller::new(vec![]),
            Err(CrapsError::EmptyReplay)
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_faces() {
        let dice: Dice = serde_json::from_str(r#"{"die1": 2, "die2": 5}"#).unwrap();
        assert_eq!((2, 5), (dice.die1(), dice.die2()));
        assert_eq!(7, dice.total());

        assert!(serde_json::from_str::<Dice>(r#"{"die1": 200, "die2": 100}"#).is_err());
        assert!(serde_json::from_str::<Dice>(r#"{"die1": 0, "die2": 3}"#).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!("3, 4", Dice::new(3, 4).unwrap().to_string());
    }
}
