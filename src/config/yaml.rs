//! Duplicate-key-safe YAML parsing
//!
//! Many YAML loaders silently let a repeated key overwrite the earlier entry,
//! which hides config mistakes like two models pasted in under the same name.
//! serde_yaml rejects repeated keys while constructing any mapping node,
//! nested ones included; this module turns that failure into a
//! [`ModelboxError::DuplicateKey`] carrying the offending key and its 1-based
//! source line.

use serde_yaml::{Mapping, Value};

use crate::error::{ModelboxError, Result};

/// Parse a YAML document into its top-level mapping.
///
/// Fails with `DuplicateKey` if any mapping in the document repeats a key,
/// and with `InvalidFormat` if the document does not parse or its top level
/// is not a mapping.
pub fn parse_mapping(text: &str) -> Result<Mapping> {
    if text.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(ModelboxError::InvalidFormat(
            "top level of a config file must be a mapping of model names".to_string(),
        )),
        Err(err) => Err(classify_yaml_error(text, &err)),
    }
}

/// Map a serde_yaml failure onto the crate error taxonomy, pulling the key
/// name and line number out of duplicate-entry errors.
fn classify_yaml_error(text: &str, err: &serde_yaml::Error) -> ModelboxError {
    let message = err.to_string();
    if message.contains("duplicate entry") {
        let key = quoted_fragment(&message).unwrap_or_else(|| "<non-string key>".to_string());
        let mapping_line = err.location().map(|loc| loc.line()).unwrap_or(1);
        let line = locate_repeated_key(text, &key, mapping_line);
        return ModelboxError::DuplicateKey { key, line };
    }
    ModelboxError::InvalidFormat(message)
}

/// Find the 1-based line of the repeated key itself.
///
/// serde_yaml positions a duplicate-entry error at the start of the
/// enclosing mapping, not at the repeated key. Scanning forward from that
/// start, the first `key:` at some indentation is the original entry and the
/// next `key:` at the same indentation is the offending one. Occurrences at
/// other depths belong to other mappings and are skipped. Falls back to the
/// mapping start when the key cannot be found in block form (e.g. flow-style
/// `{a: 1, a: 2}` on one line).
fn locate_repeated_key(text: &str, key: &str, mapping_line: usize) -> usize {
    let start = mapping_line.max(1);
    let mut first_indent: Option<usize> = None;

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        if number < start {
            continue;
        }
        let trimmed = line.trim_start();
        let is_key = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with(':'));
        if !is_key {
            continue;
        }
        let indent = line.len() - trimmed.len();
        match first_indent {
            None => first_indent = Some(indent),
            Some(expected) if indent == expected => return number,
            Some(_) => {}
        }
    }

    mapping_line
}

/// Extract the first double-quoted fragment of an error message, which is how
/// serde_yaml reports the repeated key.
fn quoted_fragment(message: &str) -> Option<String> {
    let start = message.find('"')? + 1;
    let end = start + message[start..].find('"')?;
    Some(message[start..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_mapping() {
        let mapping = parse_mapping("Model1:\n  description: a model\n").unwrap();
        assert_eq!(mapping.len(), 1);
        assert!(mapping.contains_key(&Value::String("Model1".to_string())));
    }

    #[test]
    fn test_empty_document_is_empty_mapping() {
        let mapping = parse_mapping("").unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_top_level_list_rejected() {
        let err = parse_mapping("- one\n- two\n").unwrap_err();
        assert!(matches!(err, ModelboxError::InvalidFormat(_)));
    }

    #[test]
    fn test_duplicate_top_level_key_reports_its_line() {
        let text = "Model1:\n  description: first\nModel1:\n  description: second\n";
        let err = parse_mapping(text).unwrap_err();
        match err {
            ModelboxError::DuplicateKey { key, line } => {
                assert_eq!(key, "Model1");
                // the repeated key sits on line 3, not the mapping start
                assert_eq!(line, 3);
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_nested_key_reports_its_line() {
        let text = "Model1:\n  description: first\n  description: again\n";
        let err = parse_mapping(text).unwrap_err();
        match err {
            ModelboxError::DuplicateKey { key, line } => {
                assert_eq!(key, "description");
                assert_eq!(line, 3);
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_line_skips_same_key_at_other_depths() {
        // the nested Model1 on line 4 belongs to a different mapping and
        // must not be mistaken for the top-level repeat on line 5
        let text = "Model1:\n  description: first\nNested:\n  Model1: inner\nModel1:\n  description: second\n";
        let err = parse_mapping(text).unwrap_err();
        match err {
            ModelboxError::DuplicateKey { key, line } => {
                assert_eq!(key, "Model1");
                assert_eq!(line, 5);
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_is_invalid_format() {
        let err = parse_mapping("Model1: [unclosed\n").unwrap_err();
        assert!(matches!(err, ModelboxError::InvalidFormat(_)));
    }
}
