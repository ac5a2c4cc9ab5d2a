//! Reconciliation of per-chunk results into one output.
//!
//! The first chunk's result decides the shape of the whole batch: a JSON
//! list, a JSON object, or opaque text. List batches concatenate, object
//! batches merge key by key, and opaque batches keep the untouched result
//! sequence. Merging is total: any input yields a printable output.

use serde_json::Value;

/// Structural shape of a merge batch, decided by the first result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeShape {
    List,
    Object,
    Opaque,
}

/// Outcome of merging a batch of chunk results.
///
/// `Structured` carries a reconciled JSON aggregate. `OriginalSequence`
/// carries the untouched per-chunk results, used when the first result is
/// not a JSON list or object. `PlainText` is the final fallback for an
/// empty batch.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    Structured(Value),
    OriginalSequence(Vec<String>),
    PlainText(Vec<String>),
}

impl MergeOutcome {
    /// Short label for logs and run history.
    pub fn tier(&self) -> &'static str {
        match self {
            MergeOutcome::Structured(_) => "structured",
            MergeOutcome::OriginalSequence(_) => "original-sequence",
            MergeOutcome::PlainText(_) => "plain-text",
        }
    }
}

/// Final rendered output of a merge.
#[derive(Debug, Clone)]
pub struct MergedOutput {
    /// The text to emit
    pub text: String,
    /// Which tier produced it ("structured", "original-sequence", "plain-text")
    pub tier: &'static str,
}

/// Merge chunk results into a single outcome. Never fails.
pub fn merge(results: &[String]) -> MergeOutcome {
    let Some(first) = results.first() else {
        return MergeOutcome::PlainText(Vec::new());
    };

    match detect_shape(first) {
        MergeShape::List => MergeOutcome::Structured(merge_lists(results)),
        MergeShape::Object => MergeOutcome::Structured(merge_objects(results)),
        MergeShape::Opaque => MergeOutcome::OriginalSequence(results.to_vec()),
    }
}

/// Merge chunk results and render them as the final output string.
///
/// Structured aggregates and original sequences render as pretty-printed
/// JSON. If rendering fails, the raw results are joined with blank lines so
/// the pipeline still emits something printable.
pub fn merge_to_output(results: &[String]) -> MergedOutput {
    let outcome = merge(results);
    let tier = outcome.tier();

    match outcome {
        MergeOutcome::Structured(value) => render_json(&value, results, tier),
        MergeOutcome::OriginalSequence(sequence) => render_json(&sequence, results, tier),
        MergeOutcome::PlainText(sequence) => MergedOutput {
            text: sequence.join("\n\n"),
            tier,
        },
    }
}

fn detect_shape(first: &str) -> MergeShape {
    match serde_json::from_str::<Value>(first) {
        Ok(Value::Array(_)) => MergeShape::List,
        Ok(Value::Object(_)) => MergeShape::Object,
        _ => MergeShape::Opaque,
    }
}

/// Concatenate every result that parses as a JSON list, in order. Results
/// that do not parse as lists are skipped.
fn merge_lists(results: &[String]) -> Value {
    let mut merged = Vec::new();

    for result in results {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(result) {
            merged.extend(items);
        }
    }

    Value::Array(merged)
}

/// Merge every result that parses as a JSON object, key by key. When a key
/// repeats and both values are lists they are concatenated; any other
/// repeat overwrites the earlier value. Results that do not parse as
/// objects are skipped.
fn merge_objects(results: &[String]) -> Value {
    let mut merged = serde_json::Map::new();

    for result in results {
        let Ok(Value::Object(object)) = serde_json::from_str::<Value>(result) else {
            continue;
        };

        for (key, value) in object {
            let combined = match (merged.remove(&key), value) {
                (Some(Value::Array(mut existing)), Value::Array(incoming)) => {
                    existing.extend(incoming);
                    Value::Array(existing)
                }
                (_, value) => value,
            };
            merged.insert(key, combined);
        }
    }

    Value::Object(merged)
}

fn render_json<T: serde::Serialize>(
    value: &T,
    results: &[String],
    tier: &'static str,
) -> MergedOutput {
    match serde_json::to_string_pretty(value) {
        Ok(text) => MergedOutput { text, tier },
        Err(e) => {
            tracing::warn!("Failed to render merged output, falling back to plain text: {}", e);
            MergedOutput {
                text: results.join("\n\n"),
                tier: "plain-text",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_results_concatenate_in_order() {
        let results = vec![
            r#"["a"]"#.to_string(),
            r#"["b", "c"]"#.to_string(),
            r#"["d"]"#.to_string(),
        ];

        let outcome = merge(&results);
        assert_eq!(outcome.tier(), "structured");
        assert_eq!(outcome, MergeOutcome::Structured(json!(["a", "b", "c", "d"])));
    }

    #[test]
    fn test_list_merge_skips_unparseable_results() {
        let results = vec![
            r#"[1]"#.to_string(),
            "not json at all".to_string(),
            r#"{"error": "chunk failed"}"#.to_string(),
            r#"[2]"#.to_string(),
        ];

        assert_eq!(merge(&results), MergeOutcome::Structured(json!([1, 2])));
    }

    #[test]
    fn test_object_merge_concatenates_list_values() {
        let results = vec![
            r#"{"items": [1], "source": "first"}"#.to_string(),
            r#"{"items": [2, 3]}"#.to_string(),
        ];

        assert_eq!(
            merge(&results),
            MergeOutcome::Structured(json!({"items": [1, 2, 3], "source": "first"}))
        );
    }

    #[test]
    fn test_object_merge_overwrites_scalar_values() {
        let results = vec![
            r#"{"count": 1}"#.to_string(),
            r#"{"count": 2}"#.to_string(),
        ];

        assert_eq!(merge(&results), MergeOutcome::Structured(json!({"count": 2})));
    }

    #[test]
    fn test_object_merge_overwrites_on_type_mismatch() {
        // List replaced by scalar
        let results = vec![
            r#"{"a": [1]}"#.to_string(),
            r#"{"a": "x"}"#.to_string(),
        ];
        assert_eq!(merge(&results), MergeOutcome::Structured(json!({"a": "x"})));

        // Scalar replaced by list
        let results = vec![
            r#"{"a": "x"}"#.to_string(),
            r#"{"a": [1]}"#.to_string(),
        ];
        assert_eq!(merge(&results), MergeOutcome::Structured(json!({"a": [1]})));
    }

    #[test]
    fn test_object_merge_overwrites_nested_objects() {
        let results = vec![
            r#"{"meta": {"x": 1}}"#.to_string(),
            r#"{"meta": {"y": 2}}"#.to_string(),
        ];

        assert_eq!(
            merge(&results),
            MergeOutcome::Structured(json!({"meta": {"y": 2}}))
        );
    }

    #[test]
    fn test_object_merge_skips_unparseable_results() {
        let results = vec![
            r#"{"a": 1}"#.to_string(),
            "garbage".to_string(),
            r#"{"b": 2}"#.to_string(),
        ];

        assert_eq!(
            merge(&results),
            MergeOutcome::Structured(json!({"a": 1, "b": 2}))
        );
    }

    #[test]
    fn test_unparseable_first_result_keeps_original_sequence() {
        let results = vec!["plain prose summary".to_string(), r#"[1]"#.to_string()];

        let outcome = merge(&results);
        assert_eq!(outcome.tier(), "original-sequence");
        assert_eq!(outcome, MergeOutcome::OriginalSequence(results.clone()));
    }

    #[test]
    fn test_scalar_first_result_keeps_original_sequence() {
        let results = vec!["42".to_string(), r#""text""#.to_string()];

        assert_eq!(merge(&results), MergeOutcome::OriginalSequence(results.clone()));
    }

    #[test]
    fn test_empty_batch_is_plain_text() {
        let outcome = merge(&[]);
        assert_eq!(outcome.tier(), "plain-text");
        assert_eq!(outcome, MergeOutcome::PlainText(Vec::new()));
    }

    #[test]
    fn test_render_structured_as_pretty_json() {
        let results = vec![r#"["a"]"#.to_string(), r#"["b"]"#.to_string()];

        let output = merge_to_output(&results);
        assert_eq!(output.tier, "structured");
        assert_eq!(
            output.text,
            serde_json::to_string_pretty(&json!(["a", "b"])).unwrap()
        );
    }

    #[test]
    fn test_render_original_sequence_as_json_array() {
        let results = vec!["first reply".to_string(), "second reply".to_string()];

        let output = merge_to_output(&results);
        assert_eq!(output.tier, "original-sequence");
        assert_eq!(
            output.text,
            serde_json::to_string_pretty(&results).unwrap()
        );
    }

    #[test]
    fn test_render_empty_batch_is_empty_string() {
        let output = merge_to_output(&[]);
        assert_eq!(output.tier, "plain-text");
        assert_eq!(output.text, "");
    }

    #[test]
    fn test_merge_never_fails_on_mixed_garbage() {
        let results = vec![
            "\u{0}\u{1}binary".to_string(),
            String::new(),
            r#"{"k": [null]}"#.to_string(),
        ];

        let output = merge_to_output(&results);
        assert_eq!(output.tier, "original-sequence");
        assert!(!output.text.is_empty());
    }
}
