use super::{
    planner::{char_range, BlankMap, BlankPlan},
    population::select_population,
    settings::{ExerciseConfig, Mode},
    token::Token,
};
use itertools::Itertools;
use rand::{seq::SliceRandom, Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// One renderable piece of an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayUnit {
    /// A token shown as-is.
    Literal { text: String },
    /// An input field for the blank at `index`, with the visible text around it.
    Blank {
        prefix: String,
        index: usize,
        suffix: String,
    },
}

impl DisplayUnit {
    pub fn blank_index(&self) -> Option<usize> {
        match self {
            DisplayUnit::Blank { index, .. } => Some(*index),
            DisplayUnit::Literal { .. } => None,
        }
    }
}

pub fn build_display(tokens: &[Token<'_>], plan: &BlankPlan) -> Vec<DisplayUnit> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| match plan.spans.get(&index) {
            Some(span) => DisplayUnit::Blank {
                prefix: format!("{}{}", token.leading, &token.core[..span.start]),
                index,
                suffix: format!("{}{}", &token.core[span.end..], token.trailing),
            },
            None => DisplayUnit::Literal {
                text: token.text(),
            },
        })
        .collect()
}

/// Number of decoys to add for `answers` real entries.
///
/// Saturates at `usize::MAX` for huge or infinite multipliers; NaN gives 0.
pub fn decoy_count(answers: usize, multiplier: f64) -> usize {
    if answers == 0 || multiplier.is_nan() || multiplier <= 0.0 {
        return 0;
    }
    (answers as f64 * multiplier).ceil() as usize
}

/// Pick decoy entries from tokens that were not blanked.
///
/// Decoys are unique and never equal to any answer.
pub fn draw_decoys(
    tokens: &[Token<'_>],
    plan: &BlankPlan,
    answers: &BlankMap,
    config: &ExerciseConfig,
    rng: &mut dyn RngCore,
) -> Vec<String> {
    let requested = decoy_count(answers.len(), config.decoy_multiplier);
    if requested == 0 {
        return Vec::new();
    }

    let taken: BTreeSet<String> = answers.values().map(|a| a.to_lowercase()).collect();
    let sources: Vec<String> = select_population(tokens, config.words)
        .into_iter()
        .filter(|candidate| !plan.contains(candidate.index))
        .map(|candidate| candidate.core.to_lowercase())
        .unique()
        .collect();
    // at most one decoy per source word
    let wanted = requested.min(sources.len());
    if wanted < requested {
        debug!(requested, sources = sources.len(), "fewer decoy sources than requested");
    }

    match config.mode {
        Mode::Full => sources
            .into_iter()
            .filter(|word| !taken.contains(word.as_str()))
            .collect::<Vec<_>>()
            .choose_multiple(rng, wanted)
            .cloned()
            .collect(),
        Mode::Partial => {
            let mut order: Vec<&String> = sources.iter().collect();
            order.shuffle(rng);
            let mut decoys = Vec::with_capacity(wanted);
            for word in order {
                if decoys.len() == wanted {
                    break;
                }
                if let Some(fragment) = fragment_of(word, config, rng) {
                    if !taken.contains(fragment.as_str()) && !decoys.contains(&fragment) {
                        decoys.push(fragment);
                    }
                }
            }
            decoys
        }
    }
}

/// A random substring of `word` whose length looks like a partial-mode answer.
fn fragment_of(word: &str, config: &ExerciseConfig, rng: &mut dyn RngCore) -> Option<String> {
    let len = word.chars().count();
    let shortest = config.partial.min_remove.max(1);
    if len < shortest {
        return None;
    }
    let longest = ((len as f64 * config.partial.decoy_fragment_ratio).floor() as usize)
        .max(shortest)
        .min(len);
    let size = rng.gen_range(shortest..=longest);
    let start = rng.gen_range(0..=len - size);
    Some(word[char_range(word, start, size)].to_string())
}

/// Uniformly permute the bank in place.
pub fn shuffle_word_bank<T>(bank: &mut [T], rng: &mut dyn RngCore) {
    bank.shuffle(rng);
}

/// Answers plus optional decoys, shuffled.
pub fn build_word_bank(
    tokens: &[Token<'_>],
    plan: &BlankPlan,
    answers: &BlankMap,
    config: &ExerciseConfig,
    rng: &mut dyn RngCore,
) -> Vec<String> {
    let mut bank: Vec<String> = answers.values().cloned().collect();
    if config.include_decoys {
        bank.extend(draw_decoys(tokens, plan, answers, config, rng));
    }
    shuffle_word_bank(&mut bank, rng);
    bank
}
