//! Blank selection and exercise construction.
//!
//! Text flows one way through the submodules: [`token`] splits it,
//! [`population`] picks the words that may be hidden, [`planner`] decides what
//! to hide, [`assembler`] builds the display sequence and word bank, and
//! [`evaluator`] scores the learner's answers. Every step takes its random
//! source as an argument, so a seeded generator reproduces an exercise exactly.

pub mod assembler;
pub mod evaluator;
pub mod exercise;
pub mod planner;
pub mod population;
pub mod settings;
pub mod token;

// Re-export the main types for convenience
pub use assembler::{build_display, build_word_bank, shuffle_word_bank, DisplayUnit};
pub use evaluator::{
    evaluate, parse_submissions, BlankVerdict, EvaluationResult, Submissions, EMPTY_SENTINEL,
};
pub use exercise::{generate_exercise, reblank, ExerciseState};
pub use planner::{
    target_count, BlankMap, BlankPlan, BlankPlanner, PartialPlanner, WholeWordPlanner,
};
pub use population::{select_population, Candidate, WordFilter};
pub use settings::{ExerciseConfig, Mode, OffsetPolicy, PartialConfig};
pub use token::{parse_token, tokenize, tokenize_parsed, Token, PUNCTUATION};
