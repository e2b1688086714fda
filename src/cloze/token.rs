/// Characters stripped from either end of a token before it is considered for a blank.
pub const PUNCTUATION: &str = ".!,?;:'\"()[]{}<>";

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(c)
}

/// A whitespace-delimited token split into its punctuation and core parts.
///
/// `leading + core + trailing` always equals the original token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub leading: &'a str,
    pub core: &'a str,
    pub trailing: &'a str,
}

impl<'a> Token<'a> {
    /// Length of the core in characters.
    pub fn core_len(&self) -> usize {
        self.core.chars().count()
    }

    pub fn text(&self) -> String {
        format!("{}{}{}", self.leading, self.core, self.trailing)
    }
}

/// Split text on runs of whitespace. Tokens are never empty.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn parse_token(token: &str) -> Token<'_> {
    let Some(start) = token.find(|c: char| !is_punctuation(c)) else {
        // Pure punctuation: everything counts as leading.
        return Token {
            leading: token,
            core: "",
            trailing: "",
        };
    };

    let end = token
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_punctuation(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(token.len());

    Token {
        leading: &token[..start],
        core: &token[start..end],
        trailing: &token[end..],
    }
}

pub fn tokenize_parsed(text: &str) -> Vec<Token<'_>> {
    tokenize(text).into_iter().map(parse_token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_whitespace_runs() {
        let tokens = tokenize("  The quick\tbrown\n\nfox  ");
        assert_eq!(tokens, vec!["The", "quick", "brown", "fox"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_parse_plain_word() {
        let token = parse_token("elephant");
        assert_eq!(token.leading, "");
        assert_eq!(token.core, "elephant");
        assert_eq!(token.trailing, "");
    }

    #[test]
    fn test_parse_surrounding_punctuation() {
        let token = parse_token("(\"Hello!\")");
        assert_eq!(token.leading, "(\"");
        assert_eq!(token.core, "Hello");
        assert_eq!(token.trailing, "!\")");
    }

    #[test]
    fn test_parse_keeps_inner_punctuation() {
        let token = parse_token("'don't'");
        assert_eq!(token.leading, "'");
        assert_eq!(token.core, "don't");
        assert_eq!(token.trailing, "'");

        let token = parse_token("well-being,");
        assert_eq!(token.core, "well-being");
        assert_eq!(token.trailing, ",");
    }

    #[test]
    fn test_parse_pure_punctuation() {
        let token = parse_token("...");
        assert_eq!(token.leading, "...");
        assert_eq!(token.core, "");
        assert_eq!(token.trailing, "");
        assert_eq!(token.core_len(), 0);
    }

    #[test]
    fn test_parse_non_ascii_core() {
        let token = parse_token("«café»,");
        // « and » are not in the punctuation set
        assert_eq!(token.core, "«café»");
        assert_eq!(token.trailing, ",");
        assert_eq!(token.core_len(), 6);
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let samples = [
            "", "a", "dog.", "\"Stop!\"", "(yes)", "...", "?!", "[x]", "it's", "end.)",
            "naïve;", "'", "{{braces}}", "<tag>", "mid.dle",
        ];
        for sample in samples {
            let token = parse_token(sample);
            assert_eq!(token.text(), sample, "round trip failed for {sample:?}");
        }
    }

    #[test]
    fn test_tokenize_parsed_preserves_order() {
        let tokens = tokenize_parsed("Hi, there. Bye!");
        let cores: Vec<&str> = tokens.iter().map(|t| t.core).collect();
        assert_eq!(cores, vec!["Hi", "there", "Bye"]);
    }
}
