use crate::cloze::{
    evaluate, generate_exercise, parse_submissions, reblank, EvaluationResult, ExerciseConfig,
    ExerciseState, Submissions,
};
use rand::RngCore;
use tracing::{debug, info};

/// The exercise currently on screen, plus what the learner has typed into it.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: ExerciseConfig,
    exercise: ExerciseState,
    answers: Submissions,
    result: Option<EvaluationResult>,
}

impl Session {
    pub fn start(title: &str, text: &str, config: ExerciseConfig, rng: &mut dyn RngCore) -> Self {
        let exercise = generate_exercise(title, text, &config, rng);
        Self::resume(exercise, config)
    }

    /// Continue a previously generated exercise without touching its blanks.
    pub fn resume(exercise: ExerciseState, config: ExerciseConfig) -> Self {
        Self {
            config,
            exercise,
            answers: Submissions::new(),
            result: None,
        }
    }

    pub fn exercise(&self) -> &ExerciseState {
        &self.exercise
    }

    pub fn answers(&self) -> &Submissions {
        &self.answers
    }

    pub fn result(&self) -> Option<&EvaluationResult> {
        self.result.as_ref()
    }

    /// Record an answer. Returns false when `index` is not a blank.
    pub fn answer(&mut self, index: usize, text: impl Into<String>) -> bool {
        if !self.exercise.blank_map.contains_key(&index) {
            debug!(index, "ignoring answer for a position that is not blank");
            return false;
        }
        self.answers.insert(index, text.into());
        self.result = None;
        true
    }

    /// Record answers from string-keyed form fields. Returns how many were accepted.
    pub fn submit_form<I, K, V>(&mut self, fields: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut accepted = 0;
        for (index, text) in parse_submissions(fields) {
            if self.answer(index, text) {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn evaluate(&mut self) -> &EvaluationResult {
        let result = evaluate(&self.exercise.blank_map, &self.answers);
        info!(
            title = %self.exercise.title,
            score = result.score,
            total = result.total,
            "evaluation complete"
        );
        self.result.insert(result)
    }

    /// Draw new blanks over the same text and start over.
    pub fn reblank(&mut self, rng: &mut dyn RngCore) {
        self.exercise = reblank(&self.exercise, &self.config, rng);
        self.answers.clear();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const TEXT: &str = "Cooking pasta is easy. First, fill a big pot with water and add some salt.";

    fn session(seed: u64) -> Session {
        let config = ExerciseConfig {
            percentage: 25,
            ..ExerciseConfig::default()
        };
        Session::start("Pasta", TEXT, config, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn answers_only_land_on_blanks() {
        let mut session = session(1);
        let first = *session.exercise().blank_map.keys().next().unwrap();
        assert!(session.answer(first, "anything"));
        assert!(!session.answer(10_000, "nope"));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn evaluate_scores_answers() {
        let mut session = session(2);
        let expected: Vec<(usize, String)> = session
            .exercise()
            .blank_map
            .iter()
            .map(|(&i, w)| (i, w.clone()))
            .collect();
        let (first_index, first_word) = expected[0].clone();
        session.answer(first_index, first_word.to_uppercase());

        let result = session.evaluate().clone();
        assert_eq!(result.total, expected.len());
        assert_eq!(result.score, 1);
        assert_eq!(session.result(), Some(&result));
    }

    #[test]
    fn submit_form_skips_bad_keys() {
        let mut session = session(3);
        let index = *session.exercise().blank_map.keys().next().unwrap();
        let key = format!("BLANK_{index}");
        let accepted = session.submit_form(vec![
            (key.as_str(), "guess"),
            ("BLANK_abc", "x"),
            ("99999", "y"),
        ]);
        assert_eq!(accepted, 1);
        assert_eq!(session.answers().get(&index).map(String::as_str), Some("guess"));
    }

    #[test]
    fn reblank_resets_answers_and_keeps_text() {
        let mut session = session(4);
        let index = *session.exercise().blank_map.keys().next().unwrap();
        session.answer(index, "guess");
        session.evaluate();

        session.reblank(&mut StdRng::seed_from_u64(5));
        assert!(session.answers().is_empty());
        assert!(session.result().is_none());
        assert_eq!(session.exercise().original_text, TEXT);
        assert_eq!(session.exercise().title, "Pasta");
    }

    #[test]
    fn new_answer_invalidates_result() {
        let mut session = session(6);
        let index = *session.exercise().blank_map.keys().next().unwrap();
        session.evaluate();
        assert!(session.result().is_some());
        session.answer(index, "again");
        assert!(session.result().is_none());
    }
}
