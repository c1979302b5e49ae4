use crate::i18n::Locale;
use crate::score::Signature;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("range must contain at least 2 numbers (min {min} must be < max {max})")]
    InvalidRange { min: i64, max: i64 },
    #[error("number of attempts must be in 1..={} (got {0})", u32::MAX)]
    InvalidAttempts(i64),
}

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
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Fixed preset: default range plus attempts granted on top of a binary search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub min: i64,
    pub max: i64,
    pub spare_attempts: u32,
}

impl Difficulty {
    pub fn preset(&self) -> Preset {
        match self {
            Difficulty::Easy => Preset {
                min: 1,
                max: 50,
                spare_attempts: 2,
            },
            Difficulty::Normal => Preset {
                min: 1,
                max: 100,
                spare_attempts: 1,
            },
            Difficulty::Hard => Preset {
                min: 1,
                max: 1000,
                spare_attempts: 0,
            },
        }
    }
}

/// Values the player asked for explicitly; each one replaces its preset field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub attempts: Option<i64>,
}

/// Immutable settings for a whole run (every replayed round shares them)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub min: i64,
    pub max: i64,
    pub attempt_limit: u32,
    pub proximity: bool,
    pub scoring: bool,
    pub seed: Option<u64>,
    pub locale: Locale,
    pub color: bool,
    pub quiet: bool,
}

impl SessionConfig {
    pub fn signature(&self) -> Signature {
        Signature::new(self.min, self.max, self.attempt_limit)
    }

    pub fn with_proximity(mut self, enabled: bool) -> Self {
        self.proximity = enabled;
        self
    }

    pub fn with_scoring(mut self, enabled: bool) -> Self {
        self.scoring = enabled;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Smallest n with 2^n >= count, i.e. the worst case of a binary search
pub fn binary_search_attempts(count: u128) -> u32 {
    if count <= 1 {
        return 0;
    }
    u128::BITS - (count - 1).leading_zeros()
}

/// Merge a difficulty preset with explicit overrides.
///
/// The range is validated first, then the attempt limit. When no attempt count
/// is given, the preset derives one from the size of the resolved range.
/// Presentation flags start off and are set with the `with_*` builders.
pub fn resolve(difficulty: Difficulty, overrides: &Overrides) -> Result<SessionConfig, ConfigError> {
    let preset = difficulty.preset();
    let min = overrides.min.unwrap_or(preset.min);
    let max = overrides.max.unwrap_or(preset.max);
    if min >= max {
        return Err(ConfigError::InvalidRange { min, max });
    }

    let attempt_limit = match overrides.attempts {
        Some(n) if n <= 0 => return Err(ConfigError::InvalidAttempts(n)),
        Some(n) => u32::try_from(n).map_err(|_| ConfigError::InvalidAttempts(n))?,
        None => {
            let count = (i128::from(max) - i128::from(min) + 1) as u128;
            binary_search_attempts(count) + preset.spare_attempts
        }
    };

    tracing::debug!(%difficulty, min, max, attempt_limit, "resolved session config");

    Ok(SessionConfig {
        difficulty,
        min,
        max,
        attempt_limit,
        proximity: false,
        scoring: false,
        seed: None,
        locale: Locale::default(),
        color: false,
        quiet: false,
    })
}
