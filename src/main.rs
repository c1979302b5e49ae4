use clap::Parser;
use guessnum::{
    config::{resolve, ConfigError, Difficulty, Overrides},
    i18n::{message, translate, Locale, MessageKey},
    prefs::{FilePreferencesStore, Preferences, PreferencesStore},
    runtime::StdinLines,
    score::{FileScoreStore, ScoreLedger, ScoreStore},
    session::{Session, SessionEnd},
    style::Palette,
};
use std::{io, path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;

const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_INPUT_CLOSED: u8 = 1;

/// guess the secret number before you run out of attempts
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal guess-the-number game: pick a difficulty or your own range, get higher/lower and optional hot/cold hints, and beat your best record for each range."
)]
pub struct Cli {
    /// difficulty preset; sets the default range and attempt count
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// lower bound of the range (overrides the preset)
    #[clap(long, allow_negative_numbers = true)]
    min: Option<i64>,

    /// upper bound of the range (overrides the preset)
    #[clap(long, allow_negative_numbers = true)]
    max: Option<i64>,

    /// fixed number of attempts (overrides the preset)
    #[clap(short = 'a', long, allow_negative_numbers = true)]
    attempts: Option<i64>,

    /// enable proximity hints (hot/cold)
    #[clap(short = 'p', long, overrides_with = "no_proximity")]
    proximity: bool,

    /// disable proximity hints, even when saved as a default
    #[clap(long, overrides_with = "proximity")]
    no_proximity: bool,

    /// seed the secret generator for reproducible games
    #[clap(long)]
    seed: Option<u64>,

    /// disable scoring and the local best-record file
    #[clap(long)]
    no_score: bool,

    /// interface language
    #[clap(short = 'l', long = "lang", value_enum)]
    lang: Option<Locale>,

    /// disable ANSI colors
    #[clap(long)]
    no_color: bool,

    /// quiet mode: only hints and final results
    #[clap(short = 'q', long)]
    quiet: bool,

    /// read and write best records at this path instead of the default
    #[clap(long)]
    score_file: Option<PathBuf>,

    /// print stored best records and exit
    #[clap(long)]
    scores: bool,

    /// remember the chosen difficulty, language and proximity setting
    #[clap(long)]
    save_defaults: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            min: self.min,
            max: self.max,
            attempts: self.attempts,
        }
    }

    /// None when neither proximity flag was given
    fn proximity_choice(&self) -> Option<bool> {
        match (self.proximity, self.no_proximity) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn config_error_text(err: &ConfigError, locale: Locale) -> &'static str {
    match err {
        ConfigError::InvalidRange { .. } => translate(MessageKey::ConfigErrorRange, locale),
        ConfigError::InvalidAttempts(_) => translate(MessageKey::ConfigErrorAttempts, locale),
    }
}

fn print_records<S: ScoreStore>(ledger: &ScoreLedger<S>, locale: Locale) {
    let records = ledger.records();
    if records.is_empty() {
        println!("{}", translate(MessageKey::NoRecords, locale));
        return;
    }
    println!("{}", translate(MessageKey::RecordsHeader, locale));
    for (sig, entry) in records {
        let date = entry.achieved_at.format("%Y-%m-%d").to_string();
        println!(
            "{}",
            message(
                MessageKey::RecordLine,
                locale,
                &[
                    ("min", &sig.min),
                    ("max", &sig.max),
                    ("attempts", &sig.attempt_limit),
                    ("best", &entry.best_attempts),
                    ("date", &date),
                ],
            )
        );
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let prefs_store = FilePreferencesStore::new();
    let prefs = prefs_store.load();
    let locale = cli.lang.or(prefs.language).unwrap_or_default();
    let difficulty = cli.difficulty.or(prefs.difficulty).unwrap_or_default();
    let proximity = cli.proximity_choice().unwrap_or(prefs.proximity);

    if cli.save_defaults {
        let saved = Preferences {
            difficulty: Some(difficulty),
            language: Some(locale),
            proximity,
        };
        if let Err(e) = prefs_store.save(&saved) {
            tracing::warn!(error = %e, "could not save preferences");
        }
    }

    let store = cli
        .score_file
        .as_ref()
        .map(FileScoreStore::with_path)
        .unwrap_or_default();

    if cli.scores {
        print_records(&ScoreLedger::open(store), locale);
        return ExitCode::SUCCESS;
    }

    let config = match resolve(difficulty, &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, "invalid configuration");
            eprintln!("{}", config_error_text(&e, locale));
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let config = config
        .with_proximity(proximity)
        .with_scoring(!cli.no_score)
        .with_seed(cli.seed)
        .with_locale(locale)
        .with_color(Palette::detect(cli.no_color, cli.quiet).is_enabled())
        .with_quiet(cli.quiet);

    let ledger = config.scoring.then(|| ScoreLedger::open(store));
    let mut session = Session::new(config, StdinLines::new(), io::stdout(), ledger);

    match session.run() {
        Ok(SessionEnd::Finished) => ExitCode::SUCCESS,
        Ok(SessionEnd::InputClosed) => ExitCode::from(EXIT_INPUT_CLOSED),
        Err(e) => {
            tracing::error!(error = %e, "session aborted");
            eprintln!("{}", message(MessageKey::IoError, locale, &[("error", &e)]));
            ExitCode::FAILURE
        }
    }
}
