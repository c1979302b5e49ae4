use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::OnceLock;

static LOCALE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/locales");
static CATALOGS: OnceLock<HashMap<Locale, Catalog>> = OnceLock::new();

#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];
}

/// Every player-facing line; the engine never builds strings itself
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MessageKey {
    Title,
    Intro,
    HelpProximity,
    Prompt,
    InvalidInt,
    OutOfRange,
    TooLow,
    TooHigh,
    VeryHot,
    Hot,
    Warm,
    Cold,
    Remaining,
    Win,
    WinSingle,
    Lose,
    Score,
    NewRecord,
    BestSoFar,
    PlayAgain,
    Goodbye,
    ConfigErrorRange,
    ConfigErrorAttempts,
    Eof,
    IoError,
    NoRecords,
    RecordsHeader,
    RecordLine,
}

impl MessageKey {
    pub const ALL: [MessageKey; 28] = [
        MessageKey::Title,
        MessageKey::Intro,
        MessageKey::HelpProximity,
        MessageKey::Prompt,
        MessageKey::InvalidInt,
        MessageKey::OutOfRange,
        MessageKey::TooLow,
        MessageKey::TooHigh,
        MessageKey::VeryHot,
        MessageKey::Hot,
        MessageKey::Warm,
        MessageKey::Cold,
        MessageKey::Remaining,
        MessageKey::Win,
        MessageKey::WinSingle,
        MessageKey::Lose,
        MessageKey::Score,
        MessageKey::NewRecord,
        MessageKey::BestSoFar,
        MessageKey::PlayAgain,
        MessageKey::Goodbye,
        MessageKey::ConfigErrorRange,
        MessageKey::ConfigErrorAttempts,
        MessageKey::Eof,
        MessageKey::IoError,
        MessageKey::NoRecords,
        MessageKey::RecordsHeader,
        MessageKey::RecordLine,
    ];

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Deserialize, Clone, Debug)]
struct Catalog {
    #[allow(dead_code)]
    locale: String,
    yes: String,
    no: String,
    messages: HashMap<String, String>,
}

fn read_catalog(file_name: &str) -> Catalog {
    let file = LOCALE_DIR
        .get_file(file_name)
        .expect("Locale file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret locale file as a string");

    serde_json::from_str(file_as_str).expect("Unable to deserialize locale json")
}

fn catalog(locale: Locale) -> &'static Catalog {
    let catalogs = CATALOGS.get_or_init(|| {
        Locale::ALL
            .iter()
            .map(|l| (*l, read_catalog(&format!("{l}.json"))))
            .collect()
    });
    &catalogs[&locale]
}

/// Look up a message template, falling back to English and then to the key name
pub fn translate(key: MessageKey, locale: Locale) -> &'static str {
    let name = key.as_str();
    catalog(locale)
        .messages
        .get(name)
        .or_else(|| catalog(Locale::En).messages.get(name))
        .map(String::as_str)
        .unwrap_or(name)
}

/// Replace `{name}` placeholders in a template
pub fn fill(template: &str, args: &[(&str, &dyn Display)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), &value.to_string())
    })
}

/// Translate and fill in one step
pub fn message(key: MessageKey, locale: Locale, args: &[(&str, &dyn Display)]) -> String {
    fill(translate(key, locale), args)
}

/// Interpret a yes/no answer. Empty means `default`, unrecognized means `None`.
pub fn parse_yes_no(answer: &str, locale: Locale, default: bool) -> Option<bool> {
    let Some(first) = answer.trim().chars().next() else {
        return Some(default);
    };
    let cat = catalog(locale);
    if cat.yes.contains(first) {
        Some(true)
    } else if cat.no.contains(first) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locale_has_every_key() {
        for locale in Locale::ALL {
            for key in MessageKey::ALL {
                assert!(
                    catalog(locale).messages.contains_key(key.as_str()),
                    "{locale} is missing {}",
                    key.as_str()
                );
            }
        }
    }

    #[test]
    fn test_translate() {
        assert_eq!(translate(MessageKey::TooLow, Locale::En), "My number is higher.");
        assert_eq!(translate(MessageKey::TooLow, Locale::Es), "Mi número es mayor.");
        assert_eq!(translate(MessageKey::Cold, Locale::Es), "frío");
    }

    #[test]
    fn test_fill_placeholders() {
        let s = message(
            MessageKey::OutOfRange,
            Locale::En,
            &[("min", &1), ("max", &10)],
        );
        assert_eq!(s, "Number is out of range [1..10]. Try again.");

        // Unknown placeholders are left alone
        assert_eq!(fill("{a} {b}", &[("a", &"x")]), "x {b}");
    }

    #[test]
    fn test_key_names() {
        assert_eq!(MessageKey::InvalidInt.as_str(), "invalid_int");
        assert_eq!(MessageKey::ConfigErrorRange.as_str(), "config_error_range");
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("", Locale::En, true), Some(true));
        assert_eq!(parse_yes_no("  ", Locale::En, false), Some(false));
        assert_eq!(parse_yes_no("yes", Locale::En, false), Some(true));
        assert_eq!(parse_yes_no("No", Locale::En, true), Some(false));
        assert_eq!(parse_yes_no("sí", Locale::Es, false), Some(true));
        assert_eq!(parse_yes_no("si", Locale::En, true), None);
        assert_eq!(parse_yes_no("maybe", Locale::Es, true), None);
    }

    #[test]
    fn spanish_accepts_english_style_answers() {
        assert_eq!(parse_yes_no("no", Locale::Es, true), Some(false));
        assert_eq!(parse_yes_no("O", Locale::Es, true), Some(false));
        assert_eq!(parse_yes_no("yes", Locale::Es, false), Some(true));
        assert_eq!(parse_yes_no("Í", Locale::Es, false), Some(true));
    }

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::Es.to_string(), "es");
        assert_eq!(Locale::En.to_string(), "en");
        assert_eq!(Locale::default(), Locale::Es);
    }
}
