use super::{
    population::{select_population, Candidate, WordFilter},
    settings::{OffsetPolicy, PartialConfig},
    token::Token,
};
use rand::{seq::SliceRandom, Rng, RngCore};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;
use tracing::{debug, warn};

/// Redacted strings keyed by token index, in token order.
pub type BlankMap = BTreeMap<usize, String>;

/// Which part of each token's core to hide. Spans are byte ranges into the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlankPlan {
    pub spans: BTreeMap<usize, Range<usize>>,
}

impl BlankPlan {
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.spans.contains_key(&index)
    }

    /// Lowercased hidden text for every planned blank.
    pub fn blank_map(&self, tokens: &[Token<'_>]) -> BlankMap {
        self.spans
            .iter()
            .filter_map(|(&index, span)| {
                let token = tokens.get(index)?;
                let hidden = token.core.get(span.clone())?;
                Some((index, hidden.to_lowercase()))
            })
            .filter(|(_, hidden)| !hidden.is_empty())
            .collect()
    }
}

/// Number of blanks requested for a passage of `token_count` tokens.
pub fn target_count(token_count: usize, percentage: u8) -> usize {
    (token_count * percentage as usize / 100).max(1)
}

/// Strategy that decides which tokens, or which parts of them, to hide.
pub trait BlankPlanner {
    fn plan(&self, tokens: &[Token<'_>], percentage: u8, rng: &mut dyn RngCore) -> BlankPlan;
}

/// Hides entire words.
#[derive(Debug, Clone, Default)]
pub struct WholeWordPlanner {
    pub words: WordFilter,
}

impl BlankPlanner for WholeWordPlanner {
    fn plan(&self, tokens: &[Token<'_>], percentage: u8, rng: &mut dyn RngCore) -> BlankPlan {
        let population = select_population(tokens, self.words);
        if population.is_empty() {
            warn!(tokens = tokens.len(), "no words available for blank selection");
            return BlankPlan::default();
        }

        let wanted = target_count(tokens.len(), percentage).min(population.len());
        let picked = sample_distinct(population.len(), wanted, rng);

        let spans = picked
            .into_iter()
            .map(|slot| {
                let candidate = population[slot];
                (candidate.index, 0..candidate.core.len())
            })
            .collect::<BTreeMap<_, _>>();

        debug!(
            population = population.len(),
            blanks = spans.len(),
            "planned whole-word blanks"
        );
        BlankPlan { spans }
    }
}

/// Draw `count` distinct slots from `0..population` by random index.
///
/// A draw that collides with an earlier pick is replaced by the top slot of the
/// current round, which cannot have been drawn yet, so the loop always finishes
/// after exactly `count` draws and every subset stays equally likely.
fn sample_distinct(population: usize, count: usize, rng: &mut dyn RngCore) -> BTreeSet<usize> {
    let mut picked = BTreeSet::new();
    for top in population - count..population {
        let slot = rng.gen_range(0..=top);
        if !picked.insert(slot) {
            picked.insert(top);
        }
    }
    picked
}

/// Hides a run of letters inside longer words.
#[derive(Debug, Clone)]
pub struct PartialPlanner {
    pub words: WordFilter,
    pub config: PartialConfig,
}

impl BlankPlanner for PartialPlanner {
    fn plan(&self, tokens: &[Token<'_>], percentage: u8, rng: &mut dyn RngCore) -> BlankPlan {
        let mut population = select_population(tokens, self.words);
        if population.is_empty() {
            warn!(tokens = tokens.len(), "no words available for blank selection");
            return BlankPlan::default();
        }

        let wanted = target_count(tokens.len(), percentage);
        population.shuffle(rng);

        let mut spans = BTreeMap::new();
        let mut kept_visible = 0;
        for candidate in population.iter().take(wanted) {
            match self.span_for(candidate, rng) {
                Some(span) => {
                    spans.insert(candidate.index, span);
                }
                None => kept_visible += 1,
            }
        }

        debug!(
            population = population.len(),
            blanks = spans.len(),
            kept_visible,
            "planned partial blanks"
        );
        BlankPlan { spans }
    }
}

impl PartialPlanner {
    /// Byte range of the letters to hide, or `None` when the word is too short.
    fn span_for(&self, candidate: &Candidate<'_>, rng: &mut dyn RngCore) -> Option<Range<usize>> {
        let len = candidate.len();
        if len < self.config.min_partial_len || len < 2 {
            return None;
        }

        let count = self.remove_count(len, rng);
        let start = match self.config.offset_policy {
            OffsetPolicy::Edges => {
                if rng.gen_bool(0.5) {
                    0
                } else {
                    len - count
                }
            }
            OffsetPolicy::Anywhere => rng.gen_range(0..=len - count),
        };

        Some(char_range(candidate.core, start, count))
    }

    /// Letters to remove from a word of `len` characters. Never the whole word.
    fn remove_count(&self, len: usize, rng: &mut dyn RngCore) -> usize {
        let PartialConfig {
            removal_min,
            removal_max,
            min_remove,
            max_remove,
            ..
        } = self.config;
        let (low, high) = {
            let (a, b) = (unit_fraction(removal_min), unit_fraction(removal_max));
            (a.min(b), a.max(b))
        };
        let fraction = if high > low {
            rng.gen_range(low..high)
        } else {
            low
        };
        let (min_remove, max_remove) = (min_remove.min(max_remove), max_remove.max(min_remove));

        let raw = (len as f64 * fraction).floor() as usize;
        raw.clamp(min_remove, max_remove).clamp(1, len - 1)
    }
}

/// Removal ratios outside `0.0..=1.0`, or NaN, are pulled back into range.
fn unit_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Byte range covering `count` characters of `text` starting at character `start`.
pub(crate) fn char_range(text: &str, start: usize, count: usize) -> Range<usize> {
    let mut bounds = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));
    let begin = bounds.nth(start).unwrap_or(text.len());
    let end = if count == 0 {
        begin
    } else {
        bounds.nth(count - 1).unwrap_or(text.len())
    };
    begin..end
}
