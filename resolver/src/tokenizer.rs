//! Quote-aware tokenization.
//!
//! Input is either one whitespace-delimited line or a pre-split token
//! sequence. Tokens whose content opens an unmatched double quote are merged
//! with the following tokens (joined by a single space) until the closing,
//! unescaped quote. Matching quote pairs are stripped from the merged value;
//! a backslash-escaped quote is a literal character, never a delimiter.

use command_console_core::error::{self, ResolveError};

/// Tokenizes one command line, merging quoted segments.
///
/// # Examples
///
/// ```
/// use command_console_resolver::tokenizer::tokenize_line;
///
/// let tokens = tokenize_line(r#"setname "my big door" -p=alice"#).unwrap();
/// assert_eq!(tokens, vec!["setname", "my big door", "-p=alice"]);
///
/// // An open quote with no closing match is an end-of-input error.
/// assert!(tokenize_line(r#"setname "my big door"#).is_err());
/// ```
pub fn tokenize_line(line: &str) -> error::Result<Vec<String>> {
    merge_quoted(line.split_whitespace())
}

/// Merges a pre-split token sequence across quote boundaries.
///
/// Fails with [`ResolveError::UnterminatedQuote`] when input ends inside an
/// open quote; no partial result is produced.
pub fn merge_quoted<'a, I>(tokens: I) -> error::Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    match scan(tokens) {
        (out, false) => Ok(out),
        (_, true) => Err(ResolveError::UnterminatedQuote),
    }
}

/// Tokenization output for tab completion.
#[derive(Debug, Clone, Default)]
pub struct LenientTokens {
    /// The merged tokens, including a trailing partial one if the input
    /// ended inside an open quote.
    pub tokens: Vec<String>,
    /// Whether the input ended inside an open quote (the sender is still
    /// typing a value).
    pub open_quote: bool,
    /// Whether the line ended with whitespace, i.e. the next token has not
    /// been started yet.
    pub trailing_space: bool,
}

/// Tokenizes for completion: never errors.
///
/// An open quote is treated as "still typing"; the partial content is kept
/// as the final token and flagged via [`LenientTokens::open_quote`].
pub fn tokenize_lenient(line: &str) -> LenientTokens {
    let (tokens, open_quote) = scan(line.split_whitespace());
    LenientTokens {
        tokens,
        open_quote,
        trailing_space: line.ends_with(char::is_whitespace) && !open_quote,
    }
}

/// Character scan over split tokens. Returns the merged tokens and whether
/// the input ended inside an open quote (the trailing partial token is kept
/// in the output in that case).
fn scan<'a, I>(tokens: I) -> (Vec<String>, bool)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Vec::new();
    let mut buffer = String::new();
    let mut in_quote = false;
    let mut merging = false;

    for token in tokens {
        if merging {
            buffer.push(' ');
        }
        let mut chars = token.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&'"') => {
                    chars.next();
                    buffer.push('"');
                }
                '"' => in_quote = !in_quote,
                other => buffer.push(other),
            }
        }
        if in_quote {
            merging = true;
        } else {
            out.push(std::mem::take(&mut buffer));
            merging = false;
        }
    }
    if in_quote {
        out.push(std::mem::take(&mut buffer));
    }
    (out, in_quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tokens_pass_through() {
        let tokens = tokenize_line("bigdoors movedoor mydoor 12").unwrap();
        assert_eq!(tokens, vec!["bigdoors", "movedoor", "mydoor", "12"]);
    }

    #[test]
    fn test_quotes_merge_across_tokens() {
        let tokens = tokenize_line(r#"newdoor "the grand gate" -p=bob"#).unwrap();
        assert_eq!(tokens, vec!["newdoor", "the grand gate", "-p=bob"]);
    }

    #[test]
    fn test_quote_opens_mid_token() {
        let tokens = tokenize_line(r#"-p="player one" next"#).unwrap();
        assert_eq!(tokens, vec!["-p=player one", "next"]);
    }

    #[test]
    fn test_escaped_quote_is_literal() {
        let tokens = tokenize_line(r#"say \"hi\""#).unwrap();
        assert_eq!(tokens, vec!["say", "\"hi\""]);
    }

    #[test]
    fn test_escaped_quote_inside_quoted_segment() {
        let tokens = tokenize_line(r#"setname "a \"nice\" door""#).unwrap();
        assert_eq!(tokens, vec!["setname", "a \"nice\" door"]);
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        let err = tokenize_line(r#"-p="player"#).unwrap_err();
        assert_eq!(err, ResolveError::UnterminatedQuote);
    }

    #[test]
    fn test_merge_pre_split_tokens() {
        let tokens = merge_quoted(["setname", "\"two", "words\""]).unwrap();
        assert_eq!(tokens, vec!["setname", "two words"]);
    }

    #[test]
    fn test_balanced_quotes_reproduce_content() {
        // Tokenizing strips quotes and resolves escapes, nothing else.
        let tokens = tokenize_line(r#""a b" c \"d\""#).unwrap();
        assert_eq!(tokens.join(" "), "a b c \"d\"");
    }

    #[test]
    fn test_lenient_keeps_partial_token() {
        let lenient = tokenize_lenient(r#"setname "half a nam"#);
        assert!(lenient.open_quote);
        assert_eq!(lenient.tokens, vec!["setname", "half a nam"]);
    }

    #[test]
    fn test_lenient_tracks_trailing_space() {
        assert!(tokenize_lenient("bigdoors ").trailing_space);
        assert!(!tokenize_lenient("bigdoors").trailing_space);
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize_line("").unwrap().is_empty());
        assert!(tokenize_line("   ").unwrap().is_empty());
    }
}
