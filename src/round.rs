use crate::config::SessionConfig;
use crate::hint::{directional_hint, proximity_hint, Direction, Proximity};
use crate::score::Signature;
use crate::secret::SecretGenerator;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("not an integer: {0:?}")]
    NotAnInteger(String),
    #[error("{guess} is outside [{min}..{max}]")]
    OutOfRange { guess: i64, min: i64, max: i64 },
    #[error("round already finished")]
    RoundFinished,
}

impl GuessError {
    /// Input mistakes are re-prompted; guessing into a finished round is a bug
    /// in the caller.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GuessError::RoundFinished)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundStatus::InProgress)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparison {
    TooLow,
    TooHigh,
    Correct,
}

impl From<Direction> for Comparison {
    fn from(d: Direction) -> Self {
        match d {
            Direction::TooLow => Comparison::TooLow,
            Direction::TooHigh => Comparison::TooHigh,
        }
    }
}

/// Everything the presentation layer needs to react to one accepted guess
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub guess: i64,
    pub comparison: Comparison,
    pub proximity: Option<Proximity>,
    pub attempts_remaining: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    InProgress { attempts_used: u32, attempts_remaining: u32 },
    Won { attempts_used: u32 },
    Lost { secret: i64 },
}

/// One play-through against a fixed secret
#[derive(Debug)]
pub struct Round {
    min: i64,
    max: i64,
    attempt_limit: u32,
    proximity: bool,
    secret: i64,
    attempts_used: u32,
    status: RoundStatus,
}

impl Round {
    pub fn new(config: &SessionConfig, secret: i64) -> Self {
        Self {
            min: config.min,
            max: config.max,
            attempt_limit: config.attempt_limit,
            proximity: config.proximity,
            secret,
            attempts_used: 0,
            status: RoundStatus::InProgress,
        }
    }

    /// Draw the next secret from `secrets` and start a round with it
    pub fn start(config: &SessionConfig, secrets: &mut SecretGenerator) -> Self {
        let secret = secrets.next_secret(config.min, config.max);
        Self::new(config, secret)
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempt_limit.saturating_sub(self.attempts_used)
    }

    pub fn attempt_limit(&self) -> u32 {
        self.attempt_limit
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    pub fn signature(&self) -> Signature {
        Signature::new(self.min, self.max, self.attempt_limit)
    }

    /// Parse raw player text and submit it. Surrounding whitespace is ignored.
    pub fn submit_input(&mut self, raw: &str) -> Result<GuessResult, GuessError> {
        if self.status.is_terminal() {
            return Err(GuessError::RoundFinished);
        }
        let trimmed = raw.trim();
        let guess = trimmed
            .parse::<i64>()
            .map_err(|_| GuessError::NotAnInteger(trimmed.to_string()))?;
        self.submit_guess(guess)
    }

    pub fn submit_guess(&mut self, guess: i64) -> Result<GuessResult, GuessError> {
        if self.status.is_terminal() {
            return Err(GuessError::RoundFinished);
        }
        if guess < self.min || guess > self.max {
            return Err(GuessError::OutOfRange {
                guess,
                min: self.min,
                max: self.max,
            });
        }

        self.attempts_used += 1;

        let (comparison, proximity) = if guess == self.secret {
            self.status = RoundStatus::Won;
            (Comparison::Correct, None)
        } else {
            if self.attempts_used >= self.attempt_limit {
                self.status = RoundStatus::Lost;
            }
            let proximity = self
                .proximity
                .then(|| proximity_hint(guess, self.secret, self.min, self.max));
            (directional_hint(guess, self.secret).into(), proximity)
        };

        tracing::debug!(
            guess,
            ?comparison,
            attempts_used = self.attempts_used,
            status = ?self.status,
            "guess evaluated"
        );

        Ok(GuessResult {
            guess,
            comparison,
            proximity,
            attempts_remaining: self.attempts_remaining(),
        })
    }

    /// The secret is only disclosed once the round is lost
    pub fn outcome(&self) -> Outcome {
        match self.status {
            RoundStatus::InProgress => Outcome::InProgress {
                attempts_used: self.attempts_used,
                attempts_remaining: self.attempts_remaining(),
            },
            RoundStatus::Won => Outcome::Won {
                attempts_used: self.attempts_used,
            },
            RoundStatus::Lost => Outcome::Lost {
                secret: self.secret,
            },
        }
    }
}

/// Points for a win: a flat 100 plus 10 for every attempt left unused
pub fn score_points(attempt_limit: u32, attempts_used: u32) -> u64 {
    100 + 10 * u64::from(attempt_limit.saturating_sub(attempts_used))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, Difficulty, Overrides};
    use assert_matches::assert_matches;

    fn config(min: i64, max: i64, attempts: i64) -> SessionConfig {
        resolve(
            Difficulty::Normal,
            &Overrides {
                min: Some(min),
                max: Some(max),
                attempts: Some(attempts),
            },
        )
        .unwrap()
    }

    #[test]
    fn new_round_is_in_progress() {
        let round = Round::new(&config(1, 10, 3), 7);
        assert_eq!(round.status(), RoundStatus::InProgress);
        assert_eq!(round.attempts_used(), 0);
        assert_eq!(round.attempts_remaining(), 3);
        assert_eq!(
            round.outcome(),
            Outcome::InProgress {
                attempts_used: 0,
                attempts_remaining: 3
            }
        );
    }

    #[test]
    fn wrong_guesses_report_direction_and_consume_attempts() {
        let mut round = Round::new(&config(1, 10, 3), 7);

        let r = round.submit_guess(5).unwrap();
        assert_eq!(r.comparison, Comparison::TooLow);
        assert_eq!(r.attempts_remaining, 2);
        assert_eq!(r.proximity, None);

        let r = round.submit_guess(9).unwrap();
        assert_eq!(r.comparison, Comparison::TooHigh);
        assert_eq!(r.attempts_remaining, 1);
        assert_eq!(round.status(), RoundStatus::InProgress);
    }

    #[test]
    fn win_reports_exact_attempts() {
        let mut round = Round::new(&config(1, 10, 3), 7);
        round.submit_guess(1).unwrap();
        let r = round.submit_guess(7).unwrap();
        assert_eq!(r.comparison, Comparison::Correct);
        assert_eq!(r.attempts_remaining, 1);
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.outcome(), Outcome::Won { attempts_used: 2 });
    }

    #[test]
    fn win_on_last_attempt_is_not_a_loss() {
        let mut round = Round::new(&config(1, 10, 2), 7);
        round.submit_guess(1).unwrap();
        round.submit_guess(7).unwrap();
        assert_eq!(round.outcome(), Outcome::Won { attempts_used: 2 });
    }

    #[test]
    fn exhausting_attempts_loses_and_discloses_secret() {
        let mut round = Round::new(&config(1, 10, 1), 7);
        let r = round.submit_guess(3).unwrap();
        assert_eq!(r.comparison, Comparison::TooLow);
        assert_eq!(r.attempts_remaining, 0);
        assert_eq!(round.status(), RoundStatus::Lost);
        assert_eq!(round.outcome(), Outcome::Lost { secret: 7 });
    }

    #[test]
    fn zero_limit_config_loses_on_first_miss() {
        // Built by hand, bypassing resolve()
        let cfg = SessionConfig {
            attempt_limit: 0,
            ..config(1, 10, 1)
        };
        let mut round = Round::new(&cfg, 7);
        assert_eq!(round.attempts_remaining(), 0);
        let r = round.submit_guess(2).unwrap();
        assert_eq!(r.attempts_remaining, 0);
        assert_eq!(round.outcome(), Outcome::Lost { secret: 7 });

        let mut lucky = Round::new(&cfg, 7);
        lucky.submit_guess(7).unwrap();
        assert_eq!(lucky.outcome(), Outcome::Won { attempts_used: 1 });
    }

    #[test]
    fn invalid_input_does_not_consume_attempts() {
        let mut round = Round::new(&config(1, 10, 3), 7);
        assert_eq!(
            round.submit_guess(11),
            Err(GuessError::OutOfRange {
                guess: 11,
                min: 1,
                max: 10
            })
        );
        assert_matches!(round.submit_guess(0), Err(GuessError::OutOfRange { .. }));
        assert_matches!(
            round.submit_input("seven"),
            Err(GuessError::NotAnInteger(s)) if s == "seven"
        );
        assert_matches!(round.submit_input(""), Err(GuessError::NotAnInteger(_)));
        assert_matches!(round.submit_input("3.5"), Err(GuessError::NotAnInteger(_)));
        assert_eq!(round.attempts_used(), 0);
        assert_eq!(round.status(), RoundStatus::InProgress);
    }

    #[test]
    fn submit_input_trims_whitespace() {
        let mut round = Round::new(&config(-10, 10, 3), -4);
        let r = round.submit_input("  -4 \n").unwrap();
        assert_eq!(r.guess, -4);
        assert_eq!(r.comparison, Comparison::Correct);
    }

    #[test]
    fn guessing_after_the_end_fails() {
        let mut round = Round::new(&config(1, 10, 1), 7);
        round.submit_guess(7).unwrap();
        assert_eq!(round.submit_guess(7), Err(GuessError::RoundFinished));
        assert_eq!(round.submit_input("nonsense"), Err(GuessError::RoundFinished));
        assert_eq!(round.attempts_used(), 1);

        let mut lost = Round::new(&config(1, 10, 1), 7);
        lost.submit_guess(2).unwrap();
        assert_eq!(lost.submit_guess(7), Err(GuessError::RoundFinished));
        assert_eq!(lost.outcome(), Outcome::Lost { secret: 7 });
    }

    #[test]
    fn proximity_is_attached_when_enabled() {
        let cfg = config(1, 100, 5).with_proximity(true);
        let mut round = Round::new(&cfg, 50);
        let r = round.submit_guess(52).unwrap();
        assert_eq!(r.proximity, Some(Proximity::VeryHot));
        let r = round.submit_guess(1).unwrap();
        assert_eq!(r.proximity, Some(Proximity::Cold));
        let r = round.submit_guess(50).unwrap();
        assert_eq!(r.proximity, None);
    }

    #[test]
    fn start_uses_generator() {
        let cfg = config(1, 10, 3);
        let mut gen = SecretGenerator::new(Some(42));
        let mut round = Round::start(&cfg, &mut gen);
        let secret = crate::secret::generate(1, 10, Some(42));
        let r = round.submit_guess(secret).unwrap();
        assert_eq!(r.comparison, Comparison::Correct);
        assert_eq!(round.signature(), Signature::new(1, 10, 3));
    }

    #[test]
    fn test_error_recoverability() {
        assert!(GuessError::NotAnInteger("x".into()).is_recoverable());
        assert!(GuessError::OutOfRange {
            guess: 0,
            min: 1,
            max: 2
        }
        .is_recoverable());
        assert!(!GuessError::RoundFinished.is_recoverable());
    }

    #[test]
    fn test_score_points() {
        assert_eq!(score_points(8, 1), 170);
        assert_eq!(score_points(8, 8), 100);
        assert_eq!(score_points(3, 5), 100);
    }
}
