use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

// Greedy: from the first opening brace/bracket to the last matching closer.
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}|\[.*\]").expect("static block pattern"));

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no object or array found in text")]
    NoBlock,
    #[error("candidate block is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Recover a JSON object or array from free-form model output.
///
/// The whole (trimmed) text is tried first. Failing that, the outermost
/// `{...}` or `[...]` span is cut out and parsed, which covers code fences and
/// prose around the payload. Scalars never count as a block.
pub fn extract(text: &str) -> Result<Value, ExtractError> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if is_block(&value) {
            return Ok(value);
        }
    }

    let candidate = BLOCK_RE.find(trimmed).ok_or(ExtractError::NoBlock)?;
    let value = serde_json::from_str::<Value>(candidate.as_str())?;
    Ok(value)
}

fn is_block(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_clean_object() {
        let value = extract(r#" {"summaryShort": "ok"} "#).unwrap();
        assert_eq!(value, json!({ "summaryShort": "ok" }));
    }

    #[test]
    fn parses_clean_array() {
        let value = extract(r#"[{"quote": "a"}, {"quote": "b"}]"#).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn recovers_object_from_surrounding_prose() {
        let text = "好的，以下是结果：\n```json\n{\"clusters\": [{\"label\": \"a\"}]}\n```\n希望有帮助。";
        let value = extract(text).unwrap();
        assert_eq!(value["clusters"][0]["label"], "a");
    }

    #[test]
    fn recovers_array_when_no_object_braces_precede_it() {
        let text = "Here you go: [1, 2, 3] done";
        assert_eq!(extract(text).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn object_wins_when_it_opens_first() {
        let text = r#"result {"items": [1, 2]} trailing"#;
        assert_eq!(extract(text).unwrap(), json!({ "items": [1, 2] }));
    }

    #[test]
    fn scalar_json_is_not_a_block() {
        assert!(matches!(extract("42"), Err(ExtractError::NoBlock)));
        assert!(matches!(extract(r#""just a string""#), Err(ExtractError::NoBlock)));
    }

    #[test]
    fn no_braces_is_no_block() {
        assert!(matches!(extract("the model refused"), Err(ExtractError::NoBlock)));
        assert!(matches!(extract(""), Err(ExtractError::NoBlock)));
    }

    #[test]
    fn unbalanced_candidate_is_malformed() {
        assert!(matches!(
            extract(r#"prefix {"a": 1"#),
            Err(ExtractError::NoBlock)
        ));
        assert!(matches!(
            extract(r#"prefix {"a": } suffix"#),
            Err(ExtractError::Malformed(_))
        ));
    }

    #[test]
    fn greedy_span_swallows_trailing_braces() {
        // Two separate objects: the greedy span covers both and fails to parse.
        let text = r#"first {"a": 1} and then {"b": 2}"#;
        assert!(matches!(extract(text), Err(ExtractError::Malformed(_))));
    }
}
