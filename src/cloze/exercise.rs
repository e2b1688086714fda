use super::{
    assembler::{build_display, build_word_bank, DisplayUnit},
    planner::{BlankMap, BlankPlanner, PartialPlanner, WholeWordPlanner},
    settings::{ExerciseConfig, Mode},
    token::tokenize_parsed,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything needed to render an exercise and check it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseState {
    pub title: String,
    pub original_text: String,
    pub display_sequence: Vec<DisplayUnit>,
    pub blank_map: BlankMap,
    pub word_bank: Vec<String>,
    pub mode: Mode,
}

impl ExerciseState {
    pub fn blank_count(&self) -> usize {
        self.blank_map.len()
    }

    /// True when nothing in the passage could be blanked.
    pub fn is_static(&self) -> bool {
        self.blank_map.is_empty()
    }

    /// Blank indexes in display order.
    pub fn blank_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.display_sequence.iter().filter_map(DisplayUnit::blank_index)
    }
}

impl Mode {
    pub fn planner(&self, config: &ExerciseConfig) -> Box<dyn BlankPlanner> {
        match self {
            Mode::Full => Box::new(WholeWordPlanner {
                words: config.words,
            }),
            Mode::Partial => Box::new(PartialPlanner {
                words: config.words,
                config: config.partial.clone(),
            }),
        }
    }
}

/// Build a fresh exercise from `text`.
pub fn generate_exercise(
    title: &str,
    text: &str,
    config: &ExerciseConfig,
    rng: &mut dyn RngCore,
) -> ExerciseState {
    let tokens = tokenize_parsed(text);
    let plan = config.mode.planner(config).plan(&tokens, config.percentage, rng);
    let blank_map = plan.blank_map(&tokens);
    let display_sequence = build_display(&tokens, &plan);
    let word_bank = build_word_bank(&tokens, &plan, &blank_map, config, rng);

    debug!(
        title,
        mode = %config.mode,
        tokens = tokens.len(),
        blanks = blank_map.len(),
        bank = word_bank.len(),
        "generated exercise"
    );

    ExerciseState {
        title: title.to_string(),
        original_text: text.to_string(),
        display_sequence,
        blank_map,
        word_bank,
        mode: config.mode,
    }
}

/// New blanks over the same passage. The old state is left untouched.
pub fn reblank(
    state: &ExerciseState,
    config: &ExerciseConfig,
    rng: &mut dyn RngCore,
) -> ExerciseState {
    generate_exercise(&state.title, &state.original_text, config, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloze::token::tokenize;
    use rand::{rngs::StdRng, SeedableRng};

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_whole_word_scenario() {
        let config = ExerciseConfig {
            percentage: 20,
            ..ExerciseConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let state = generate_exercise("Fox", FOX, &config, &mut rng);

        assert_eq!(state.blank_count(), 1);
        let answer = state.blank_map.values().next().unwrap();
        assert!(["quick", "brown", "jumps", "over", "lazy"].contains(&answer.as_str()));
        assert_eq!(state.word_bank, vec![answer.clone()]);
        assert_eq!(state.display_sequence.len(), 9);
        assert_eq!(state.mode, Mode::Full);
    }

    #[test]
    fn test_empty_text() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = ExerciseConfig {
            include_decoys: true,
            ..ExerciseConfig::default()
        };
        let state = generate_exercise("Empty", "", &config, &mut rng);
        assert!(tokenize("").is_empty());
        assert!(state.blank_map.is_empty());
        assert!(state.display_sequence.is_empty());
        assert!(state.word_bank.is_empty());
        assert!(state.is_static());
    }

    #[test]
    fn test_no_eligible_words_leaves_text_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let text = "I am on a big red bus.";
        let state = generate_exercise("Bus", text, &ExerciseConfig::default(), &mut rng);
        assert!(state.is_static());
        assert!(state.word_bank.is_empty());
        let rebuilt: Vec<String> = state
            .display_sequence
            .iter()
            .map(|unit| match unit {
                DisplayUnit::Literal { text } => text.clone(),
                DisplayUnit::Blank { .. } => panic!("unexpected blank"),
            })
            .collect();
        assert_eq!(rebuilt.join(" "), text);
    }

    #[test]
    fn test_display_and_blank_map_agree() {
        let text = "Every morning, Maria walks her energetic puppy through the quiet neighbourhood park.";
        for mode in [Mode::Full, Mode::Partial] {
            let config = ExerciseConfig {
                mode,
                percentage: 40,
                include_decoys: true,
                decoy_multiplier: 1.0,
                ..ExerciseConfig::default()
            };
            let mut rng = StdRng::seed_from_u64(77);
            let state = generate_exercise("Walk", text, &config, &mut rng);
            let shown: Vec<usize> = state.blank_indexes().collect();
            let mapped: Vec<usize> = state.blank_map.keys().copied().collect();
            assert_eq!(shown, mapped);
            for answer in state.blank_map.values() {
                assert!(state.word_bank.contains(answer));
            }
            assert!(state.word_bank.len() >= state.blank_count());
        }
    }

    #[test]
    fn test_blank_reassembles_to_original_token() {
        let text = "Suddenly, the \"enormous\" elephant trumpeted!";
        let tokens = tokenize(text);
        let config = ExerciseConfig {
            mode: Mode::Partial,
            percentage: 100,
            ..ExerciseConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let state = generate_exercise("Zoo", text, &config, &mut rng);
        for unit in &state.display_sequence {
            if let DisplayUnit::Blank {
                prefix,
                index,
                suffix,
            } = unit
            {
                let hidden = &state.blank_map[index];
                let original = tokens[*index];
                assert_eq!(
                    format!("{prefix}{hidden}{suffix}").to_lowercase(),
                    original.to_lowercase()
                );
            }
        }
    }

    #[test]
    fn test_reblank_keeps_text_and_title() {
        let config = ExerciseConfig {
            percentage: 30,
            ..ExerciseConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(10);
        let first = generate_exercise("Fox", FOX, &config, &mut rng);
        let second = reblank(&first, &config, &mut rng);
        assert_eq!(second.title, first.title);
        assert_eq!(second.original_text, first.original_text);
        assert_eq!(second.blank_count(), 2);
    }

    #[test]
    fn test_same_seed_same_exercise() {
        let config = ExerciseConfig {
            mode: Mode::Partial,
            percentage: 50,
            include_decoys: true,
            ..ExerciseConfig::default()
        };
        let a = generate_exercise("Fox", FOX, &config, &mut StdRng::seed_from_u64(3));
        let b = generate_exercise("Fox", FOX, &config, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_state_serde_round_trip() {
        let config = ExerciseConfig {
            percentage: 40,
            include_decoys: true,
            ..ExerciseConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(21);
        let state = generate_exercise("Fox", FOX, &config, &mut rng);
        let json = serde_json::to_string(&state).unwrap();
        let restored: ExerciseState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
