use super::token::Token;

/// Cores shorter than this are never blanked.
pub const DEFAULT_MIN_CORE_LEN: usize = 4;

/// A token eligible for redaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub index: usize,
    pub core: &'a str,
}

impl Candidate<'_> {
    pub fn len(&self) -> usize {
        self.core.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }
}

/// Which cores may be blanked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFilter {
    pub min_core_len: usize,
    /// Only letters, plus `-` and `'` inside the word ("well-being", "don't").
    pub letters_only: bool,
}

impl Default for WordFilter {
    fn default() -> Self {
        Self {
            min_core_len: DEFAULT_MIN_CORE_LEN,
            letters_only: true,
        }
    }
}

impl WordFilter {
    pub fn accepts(&self, core: &str) -> bool {
        // the emptiness check only matters when min_core_len is 0
        if core.is_empty() || core.chars().count() < self.min_core_len {
            return false;
        }
        !self.letters_only || is_wordlike(core)
    }
}

fn is_wordlike(core: &str) -> bool {
    let mut letters = core.chars().filter(|&c| c != '-' && c != '\'').peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

/// Filter tokens down to the ones `filter` accepts. Keeps token order.
pub fn select_population<'a>(tokens: &[Token<'a>], filter: WordFilter) -> Vec<Candidate<'a>> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| filter.accepts(token.core))
        .map(|(index, token)| Candidate {
            index,
            core: token.core,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloze::token::tokenize_parsed;

    fn min_len(min_core_len: usize) -> WordFilter {
        WordFilter {
            min_core_len,
            ..WordFilter::default()
        }
    }

    #[test]
    fn test_population_skips_short_cores() {
        let tokens = tokenize_parsed("The quick brown fox jumps over the lazy dog");
        let population = select_population(&tokens, WordFilter::default());
        let cores: Vec<&str> = population.iter().map(|c| c.core).collect();
        assert_eq!(cores, vec!["quick", "brown", "jumps", "over", "lazy"]);
        let indexes: Vec<usize> = population.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![1, 2, 4, 5, 7]);
    }

    #[test]
    fn test_population_measures_core_not_token() {
        // "dog." has a 3-letter core even though the token is 4 chars long
        let tokens = tokenize_parsed("dog. \"cat\" (birds)");
        let population = select_population(&tokens, WordFilter::default());
        assert_eq!(population.len(), 1);
        assert_eq!(population[0].core, "birds");
        assert_eq!(population[0].index, 2);
    }

    #[test]
    fn test_population_ignores_pure_punctuation() {
        let tokens = tokenize_parsed("... !!!! ----");
        assert!(select_population(&tokens, min_len(0)).is_empty());

        let loose = WordFilter {
            min_core_len: 0,
            letters_only: false,
        };
        // "----" is not in the punctuation set, so it keeps a core
        let population = select_population(&tokens, loose);
        assert_eq!(population.len(), 1);
        assert_eq!(population[0].core, "----");
    }

    #[test]
    fn test_population_threshold_is_configurable() {
        let tokens = tokenize_parsed("a bb ccc dddd");
        assert_eq!(select_population(&tokens, min_len(2)).len(), 3);
        assert_eq!(select_population(&tokens, min_len(5)).len(), 0);
    }

    #[test]
    fn test_population_skips_numbers_and_symbols() {
        let tokens = tokenize_parsed("In 2024 prices rose $100 over a+b=c levels 3rd-quarter");
        let population = select_population(&tokens, WordFilter::default());
        let cores: Vec<&str> = population.iter().map(|c| c.core).collect();
        assert_eq!(cores, vec!["prices", "rose", "over", "levels"]);
    }

    #[test]
    fn test_population_keeps_hyphens_and_apostrophes() {
        let tokens = tokenize_parsed("Their well-being, don't café -- '--'");
        let population = select_population(&tokens, WordFilter::default());
        let cores: Vec<&str> = population.iter().map(|c| c.core).collect();
        assert_eq!(cores, vec!["Their", "well-being", "don't", "café"]);
    }

    #[test]
    fn test_letters_only_can_be_disabled() {
        let tokens = tokenize_parsed("In 2024 prices rose");
        let filter = WordFilter {
            letters_only: false,
            ..WordFilter::default()
        };
        let cores: Vec<&str> = select_population(&tokens, filter)
            .iter()
            .map(|c| c.core)
            .collect();
        assert_eq!(cores, vec!["2024", "prices", "rose"]);
    }

    #[test]
    fn test_population_empty_input() {
        assert!(select_population(&[], WordFilter::default()).is_empty());
    }
}
