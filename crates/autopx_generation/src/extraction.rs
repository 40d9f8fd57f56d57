//! Utilities for extracting structured data from model responses.
//!
//! Backends asked for JSON usually return it as-is, but a response may still arrive as text
//! wrapped in a markdown fence or surrounded by commentary.

use autopx_core::GenerateResponse;
use autopx_error::{GenerationError, GenerationResult};
use serde::de::DeserializeOwned;

/// Extract a JSON object from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
///
/// # Errors
///
/// Returns `MalformedOutput` if no JSON object is found.
///
/// # Examples
///
/// ```
/// use autopx_generation::extract_json;
///
/// let response = "Here you go:\n```json\n{\"xPost\": \"Solar is cheap now.\"}\n```\n";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> GenerationResult<String> {
    if let Some(json) = extract_from_code_block(response) {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in model response"
    );

    Err(GenerationError::malformed(format!(
        "No JSON found in response (length: {})",
        response.len()
    )))
}

/// Extract content from markdown code blocks, with or without a `json` language tag.
fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let content_start = start + 3;
    // Skip to next newline (in case there's a language specifier)
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    let content = match response[skip_to..].find("```") {
        Some(end) => &response[skip_to..skip_to + end],
        // No closing fence: likely a truncated response
        None => &response[skip_to..],
    };
    let content = content.trim();
    content.starts_with('{').then(|| content.to_string())
}

/// Extract content between balanced delimiters, ignoring delimiters inside strings.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse JSON into a specific type.
///
/// # Errors
///
/// Returns `MalformedOutput` if the JSON string cannot be parsed into `T`.
pub fn parse_json<T>(json_str: &str) -> GenerationResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        GenerationError::malformed(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview))
    })
}

/// Decode the structured part of a backend response.
///
/// Prefers a native JSON output; falls back to extracting JSON from the text parts.
///
/// # Errors
///
/// Returns `MalformedOutput` when no JSON is present or it does not match `T`.
pub fn structured<T>(response: &GenerateResponse) -> GenerationResult<T>
where
    T: DeserializeOwned,
{
    if let Some(value) = response.json() {
        return serde_json::from_value(value.clone()).map_err(|e| {
            GenerationError::malformed(format!("Response does not match the expected shape: {}", e))
        });
    }

    let text = response.text();
    if text.trim().is_empty() {
        return Err(GenerationError::malformed("Backend returned no content"));
    }
    parse_json(&extract_json(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autopx_core::Output;
    use autopx_error::ErrorCategory;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Adjusted {
        adjusted_content: String,
    }

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here's the JSON you requested:

```json
{
  "adjustedContent": "Hi!"
}
```

Hope this helps!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"adjustedContent\": \"Hi!\""));
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let response = r#"Sure! Here it is: {"id": 456, "nested": {"value": "}"}} and more"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"id": 456, "nested": {"value": "}"}}"#);
    }

    #[test]
    fn test_no_json_found() {
        let err = extract_json("This is just plain text with no JSON").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedOutput);
    }

    #[test]
    fn test_structured_prefers_native_json() {
        let response = GenerateResponse::from(vec![
            Output::Text("{\"adjustedContent\": \"from text\"}".to_string()),
            Output::Json(serde_json::json!({"adjustedContent": "from json"})),
        ]);
        let adjusted: Adjusted = structured(&response).unwrap();
        assert_eq!(adjusted.adjusted_content, "from json");
    }

    #[test]
    fn test_structured_reads_fenced_text() {
        let response = GenerateResponse::from(vec![Output::Text(
            "```json\n{\"adjustedContent\": \"calm\"}\n```".to_string(),
        )]);
        let adjusted: Adjusted = structured(&response).unwrap();
        assert_eq!(adjusted.adjusted_content, "calm");
    }

    #[test]
    fn test_structured_rejects_wrong_shape() {
        let response =
            GenerateResponse::from(vec![Output::Json(serde_json::json!({"other": 1}))]);
        let err = structured::<Adjusted>(&response).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedOutput);
    }
}
