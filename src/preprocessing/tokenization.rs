use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

/// A token of an input string, with its byte range and its char range in the
/// original string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: String,
    pub range: Range<usize>,
    pub char_range: Range<usize>,
}

impl Token {
    pub fn new(value: String, range: Range<usize>, char_range: Range<usize>) -> Self {
        Self {
            value,
            range,
            char_range,
        }
    }
}

/// Splits the input into runs of word characters and runs of punctuation,
/// dropping whitespace.
///
/// Word characters are letters, numbers and `_`. Combining marks and
/// connector punctuation are not word characters, and the information
/// separators U+001C to U+001F count as whitespace.
///
/// "Don't stop!" gives `["Don", "'", "t", "stop", "!"]`.
pub fn tokenize(input: &str) -> Vec<Token> {
    lazy_static! {
        static ref WORD_PUNCT_REGEX: Regex =
            Regex::new(r"[\p{L}\p{N}_]+|[^\p{L}\p{N}_\s\x{1C}-\x{1F}]+").unwrap();
    }

    let mut tokens = Vec::new();
    let mut char_offset = 0;
    let mut byte_offset = 0;
    for found in WORD_PUNCT_REGEX.find_iter(input) {
        char_offset += input[byte_offset..found.start()].chars().count();
        let char_start = char_offset;
        char_offset += found.as_str().chars().count();
        byte_offset = found.end();
        tokens.push(Token::new(
            found.as_str().to_string(),
            found.start()..found.end(),
            char_start..char_offset,
        ));
    }
    tokens
}

pub fn tokenize_light(input: &str) -> Vec<String> {
    tokenize(input).into_iter().map(|token| token.value).collect()
}
