use serde::{Deserialize, Serialize};

use super::population::WordFilter;

/// Redaction strategy.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Blank the whole core of a word.
    #[default]
    Full,
    /// Blank a run of letters inside a word.
    Partial,
}

/// Where a partial blank may start inside a word.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OffsetPolicy {
    /// Only at the very start or the very end, so one edge of the word stays intact.
    #[default]
    Edges,
    /// Any offset that keeps the span inside the word.
    Anywhere,
}

/// Tuning for partial mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    /// Selected words with shorter cores stay fully visible.
    pub min_partial_len: usize,
    /// Fraction of the word to remove is drawn from `removal_min..removal_max`.
    pub removal_min: f64,
    pub removal_max: f64,
    pub min_remove: usize,
    pub max_remove: usize,
    pub offset_policy: OffsetPolicy,
    /// Upper bound on the length of a decoy fragment, relative to its source word.
    pub decoy_fragment_ratio: f64,
}

impl Default for PartialConfig {
    fn default() -> Self {
        Self {
            min_partial_len: 5,
            removal_min: 0.30,
            removal_max: 0.40,
            min_remove: 2,
            max_remove: 6,
            offset_policy: OffsetPolicy::Edges,
            decoy_fragment_ratio: 0.9,
        }
    }
}

/// Everything the engine needs to build one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseConfig {
    pub mode: Mode,
    /// Share of all tokens to blank, 0-100. Callers clamp this before generation.
    pub percentage: u8,
    pub include_decoys: bool,
    pub decoy_multiplier: f64,
    pub words: WordFilter,
    pub partial: PartialConfig,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Full,
            percentage: 15,
            include_decoys: false,
            decoy_multiplier: 0.5,
            words: WordFilter::default(),
            partial: PartialConfig::default(),
        }
    }
}

impl From<&crate::config::Config> for ExerciseConfig {
    fn from(cfg: &crate::config::Config) -> Self {
        Self {
            mode: cfg.mode,
            percentage: crate::config::clamp_percentage(
                cfg.percentage,
                cfg.min_percentage,
                cfg.max_percentage,
            ),
            include_decoys: cfg.include_decoys,
            decoy_multiplier: crate::config::clamp_decoy_multiplier(cfg.decoy_multiplier),
            words: WordFilter {
                min_core_len: cfg.min_core_len,
                letters_only: cfg.letters_only,
            },
            partial: PartialConfig {
                offset_policy: cfg.offset_policy,
                ..PartialConfig::default()
            },
        }
    }
}
