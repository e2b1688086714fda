//! Plain-text rendering of exercises and result sheets for the terminal.

use crate::cloze::{DisplayUnit, EvaluationResult, ExerciseState};
use itertools::Itertools;
use unicode_width::UnicodeWidthStr;

pub const DEFAULT_WIDTH: usize = 72;
const MIN_FIELD: usize = 3;

/// Input marker for a blank, sized to the expected answer.
pub fn blank_field(index: usize, expected: &str) -> String {
    let size = expected.chars().count().max(MIN_FIELD);
    format!("({index}){}", "_".repeat(size))
}

/// Greedy word wrap measured in terminal columns.
pub fn wrap_words<S: AsRef<str>>(words: &[S], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in words {
        let word = word.as_ref();
        let word_width = UnicodeWidthStr::width(word);
        if line_width > 0 && line_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn unit_text(unit: &DisplayUnit, exercise: &ExerciseState) -> String {
    match unit {
        DisplayUnit::Literal { text } => text.clone(),
        DisplayUnit::Blank {
            prefix,
            index,
            suffix,
        } => {
            let expected = exercise
                .blank_map
                .get(index)
                .map(String::as_str)
                .unwrap_or_default();
            format!("{prefix}{}{suffix}", blank_field(*index, expected))
        }
    }
}

pub fn render_exercise(exercise: &ExerciseState, width: usize) -> String {
    let words: Vec<String> = exercise
        .display_sequence
        .iter()
        .map(|unit| unit_text(unit, exercise))
        .collect();

    let mut out = format!("{} [{}]\n\n", exercise.title, exercise.mode);
    out.push_str(&wrap_words(&words, width).join("\n"));
    out.push('\n');
    if exercise.is_static() {
        out.push_str("\nNothing to fill in for this passage.\n");
    }
    out
}

pub fn render_word_bank(bank: &[String]) -> String {
    if bank.is_empty() {
        return String::new();
    }
    format!("Word bank: {}", bank.iter().join(" · "))
}

pub fn render_results(result: &EvaluationResult) -> String {
    let lines = result
        .verdicts
        .iter()
        .map(|verdict| {
            if verdict.is_correct {
                format!("  ✓ ({}) {}", verdict.index, verdict.submitted)
            } else {
                format!(
                    "  ✗ ({}) {} -> {}",
                    verdict.index,
                    verdict.display_submitted(),
                    verdict.expected
                )
            }
        })
        .join("\n");

    let mut out = String::new();
    if !lines.is_empty() {
        out.push_str(&lines);
        out.push('\n');
    }
    out.push_str(&format!("Score: {}/{}", result.score, result.total));
    out
}
