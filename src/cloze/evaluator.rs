use super::planner::BlankMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Submitted answers keyed by blank index.
pub type Submissions = BTreeMap<usize, String>;

/// Shown in place of an answer the learner left blank.
pub const EMPTY_SENTINEL: &str = "[empty]";

/// Form fields may be named `BLANK_<index>` or just `<index>`.
const FIELD_PREFIX: &str = "BLANK_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankVerdict {
    pub index: usize,
    /// Trimmed, lowercased submission; empty when nothing was submitted.
    pub submitted: String,
    pub expected: String,
    pub is_correct: bool,
}

impl BlankVerdict {
    pub fn display_submitted(&self) -> &str {
        if self.submitted.is_empty() {
            EMPTY_SENTINEL
        } else {
            &self.submitted
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub verdicts: Vec<BlankVerdict>,
    pub score: usize,
    pub total: usize,
}

impl EvaluationResult {
    pub fn verdict(&self, index: usize) -> Option<&BlankVerdict> {
        self.verdicts.iter().find(|v| v.index == index)
    }

    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Score submissions against the expected blanks.
///
/// Exact match after trimming and lowercasing. Submissions for indexes that are
/// not blanks are ignored.
pub fn evaluate(blank_map: &BlankMap, submissions: &Submissions) -> EvaluationResult {
    let verdicts: Vec<BlankVerdict> = blank_map
        .iter()
        .map(|(&index, expected)| {
            let submitted = submissions
                .get(&index)
                .map(|s| normalize(s))
                .unwrap_or_default();
            let expected = normalize(expected);
            BlankVerdict {
                index,
                is_correct: submitted == expected,
                submitted,
                expected,
            }
        })
        .collect();

    let score = verdicts.iter().filter(|v| v.is_correct).count();
    let total = blank_map.len();
    debug!(score, total, "evaluated submissions");

    EvaluationResult {
        verdicts,
        score,
        total,
    }
}

/// Turn string-keyed form data into submissions, skipping keys that are not blank indexes.
pub fn parse_submissions<I, K, V>(fields: I) -> Submissions
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut submissions = Submissions::new();
    for (key, value) in fields {
        let key = key.as_ref();
        let raw = key.strip_prefix(FIELD_PREFIX).unwrap_or(key);
        match raw.trim().parse::<usize>() {
            Ok(index) => {
                submissions.insert(index, value.into());
            }
            Err(err) => {
                warn!(key, error = %err, "skipping malformed submission key");
            }
        }
    }
    debug!(count = submissions.len(), "parsed submissions");
    submissions
}
