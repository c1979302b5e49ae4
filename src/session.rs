use crate::config::SessionConfig;
use crate::hint::Proximity;
use crate::i18n::{message, parse_yes_no, translate, Locale, MessageKey};
use crate::round::{score_points, Comparison, GuessError, GuessResult, Outcome, Round};
use crate::runtime::LineSource;
use crate::score::{ScoreLedger, ScoreStore};
use crate::secret::SecretGenerator;
use crate::style::{Palette, Tone};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("round engine rejected a guess: {0}")]
    Round(#[from] GuessError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player declined to play again
    Finished,
    /// Input ended in the middle of a round
    InputClosed,
}

/// Per-run report used by the binary and by tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds: Vec<Outcome>,
    pub new_records: usize,
}

/// Terminal front end: drives rounds with player input and renders results
pub struct Session<L: LineSource, W: Write, S: ScoreStore> {
    config: SessionConfig,
    palette: Palette,
    secrets: SecretGenerator,
    ledger: Option<ScoreLedger<S>>,
    input: L,
    out: W,
    summary: SessionSummary,
}

impl<L: LineSource, W: Write, S: ScoreStore> Session<L, W, S> {
    /// `ledger` is only consulted when scoring is enabled in `config`
    pub fn new(config: SessionConfig, input: L, out: W, ledger: Option<ScoreLedger<S>>) -> Self {
        Self {
            palette: Palette::new(config.color && !config.quiet),
            secrets: SecretGenerator::new(config.seed),
            ledger: ledger.filter(|_| config.scoring),
            config,
            input,
            out,
            summary: SessionSummary::default(),
        }
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn ledger(&self) -> Option<&ScoreLedger<S>> {
        self.ledger.as_ref()
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn locale(&self) -> Locale {
        self.config.locale
    }

    fn say(&mut self, text: &str, tone: Option<Tone>) -> io::Result<()> {
        let line = match tone {
            Some(tone) => self.palette.paint(text, tone),
            None => text.to_string(),
        };
        writeln!(self.out, "{line}")
    }

    /// Play rounds until the player stops or input runs out
    pub fn run(&mut self) -> Result<SessionEnd, SessionError> {
        loop {
            let round = Round::start(&self.config, &mut self.secrets);
            let Some(outcome) = self.play_round(round)? else {
                let text = translate(MessageKey::Eof, self.locale());
                self.say(text, Some(Tone::Failure))?;
                self.out.flush()?;
                return Ok(SessionEnd::InputClosed);
            };

            self.summary.rounds.push(outcome);
            self.report(outcome)?;

            if !self.ask_replay()? {
                if !self.config.quiet {
                    let text = translate(MessageKey::Goodbye, self.locale());
                    self.say(text, None)?;
                }
                self.out.flush()?;
                return Ok(SessionEnd::Finished);
            }
        }
    }

    fn intro(&mut self) -> io::Result<()> {
        let locale = self.locale();
        self.say(translate(MessageKey::Title, locale), Some(Tone::Title))?;
        let intro = message(
            MessageKey::Intro,
            locale,
            &[
                ("min", &self.config.min),
                ("max", &self.config.max),
                ("attempts", &self.config.attempt_limit),
            ],
        );
        self.say(&intro, None)?;
        if self.config.proximity {
            self.say(translate(MessageKey::HelpProximity, locale), Some(Tone::Info))?;
        }
        Ok(())
    }

    /// Returns None when input ends before the round does
    fn play_round(&mut self, mut round: Round) -> Result<Option<Outcome>, SessionError> {
        if !self.config.quiet {
            self.intro()?;
        }
        let locale = self.locale();

        while !round.status().is_terminal() {
            let prompt = message(
                MessageKey::Prompt,
                locale,
                &[("n", &(round.attempts_used() + 1))],
            );
            self.out.flush()?;
            let Some(line) = self.input.read_line(&prompt)? else {
                return Ok(None);
            };

            match round.submit_input(&line) {
                Ok(result) => self.feedback(&result)?,
                Err(GuessError::NotAnInteger(_)) => {
                    self.say(translate(MessageKey::InvalidInt, locale), None)?;
                }
                Err(GuessError::OutOfRange { min, max, .. }) => {
                    let text = message(MessageKey::OutOfRange, locale, &[("min", &min), ("max", &max)]);
                    self.say(&text, None)?;
                }
                Err(e @ GuessError::RoundFinished) => return Err(e.into()),
            }
        }

        Ok(Some(round.outcome()))
    }

    fn feedback(&mut self, result: &GuessResult) -> io::Result<()> {
        let locale = self.locale();
        let key = match result.comparison {
            Comparison::Correct => return Ok(()),
            Comparison::TooLow => MessageKey::TooLow,
            Comparison::TooHigh => MessageKey::TooHigh,
        };
        self.say(translate(key, locale), Some(Tone::Hint))?;

        if let Some(proximity) = result.proximity {
            let label = translate(proximity_key(proximity), locale);
            self.say(&format!("({label})"), None)?;
        }

        let remaining = message(
            MessageKey::Remaining,
            locale,
            &[("n", &result.attempts_remaining)],
        );
        self.say(&remaining, None)
    }

    fn report(&mut self, outcome: Outcome) -> io::Result<()> {
        let locale = self.locale();
        match outcome {
            Outcome::Won { attempts_used } => {
                let text = if attempts_used == 1 {
                    translate(MessageKey::WinSingle, locale).to_string()
                } else {
                    message(MessageKey::Win, locale, &[("used", &attempts_used)])
                };
                self.say(&text, Some(Tone::Success))?;
                self.record(attempts_used)
            }
            Outcome::Lost { secret } => {
                let text = message(MessageKey::Lose, locale, &[("secret", &secret)]);
                self.say(&text, Some(Tone::Failure))
            }
            Outcome::InProgress { .. } => Ok(()),
        }
    }

    fn record(&mut self, attempts_used: u32) -> io::Result<()> {
        let locale = self.locale();
        let signature = self.config.signature();
        let Some(ledger) = self.ledger.as_mut() else {
            return Ok(());
        };

        let previous = ledger.load(&signature);
        let improved = ledger.record_if_better(&signature, attempts_used);

        let points = score_points(self.config.attempt_limit, attempts_used);
        let text = message(MessageKey::Score, locale, &[("score", &points)]);
        self.say(&text, None)?;

        if improved {
            self.summary.new_records += 1;
            let prev = previous.map_or_else(|| "-".to_string(), |p| p.to_string());
            let text = message(
                MessageKey::NewRecord,
                locale,
                &[("prev", &prev), ("now", &attempts_used)],
            );
            self.say(&text, Some(Tone::Info))
        } else if let Some(best) = previous {
            let text = message(MessageKey::BestSoFar, locale, &[("best", &best)]);
            self.say(&text, None)
        } else {
            Ok(())
        }
    }

    /// Empty answer means yes; EOF means no
    fn ask_replay(&mut self) -> io::Result<bool> {
        let locale = self.locale();
        let prompt = translate(MessageKey::PlayAgain, locale);
        loop {
            self.out.flush()?;
            let Some(answer) = self.input.read_line(prompt)? else {
                return Ok(false);
            };
            if let Some(yes) = parse_yes_no(&answer, locale, true) {
                return Ok(yes);
            }
        }
    }
}

pub fn proximity_key(p: Proximity) -> MessageKey {
    match p {
        Proximity::VeryHot => MessageKey::VeryHot,
        Proximity::Hot => MessageKey::Hot,
        Proximity::Warm => MessageKey::Warm,
        Proximity::Cold => MessageKey::Cold,
    }
}
