mod tokenization;

use serde_json::Value;

pub use self::tokenization::{tokenize, tokenize_light, Token};

/// Lowercases every string found in the input, descending into arrays.
/// Other JSON values are returned untouched.
pub fn str_lower(input: &Value) -> Value {
    match input {
        Value::String(s) => Value::String(s.to_lowercase()),
        Value::Array(values) => Value::Array(values.iter().map(str_lower).collect()),
        other => other.clone(),
    }
}

pub fn lowercase_tokens(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|token| token.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_lowercase_nested_batches() {
        // Given
        let batch = json!([["Play", "THE", "song"], ["Hello"], "Wake Me UP", 3]);

        // When
        let lowered = str_lower(&batch);

        // Then
        let expected = json!([["play", "the", "song"], ["hello"], "wake me up", 3]);
        assert_eq!(expected, lowered);
    }
}
