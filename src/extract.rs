// JSON extraction from free-form model output
//
// The upstream generative-text providers return prose with a JSON payload
// buried somewhere inside it. Every proxy route used to re-implement its own
// regex scan for that payload; this module is the single shared replacement.

use thiserror::Error;

/// Errors raised while extracting a JSON payload from free text
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The text contains no `{` or `[` at all
    #[error("no JSON object or array found in text")]
    NoJsonFound,

    /// An opening bracket was found but never balanced before end of text
    #[error("JSON candidate starting at byte {start} is never closed")]
    Unbalanced { start: usize },

    /// The balanced candidate slice is not actually valid JSON
    #[error("candidate slice is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Extract the first balanced JSON object or array embedded in `text`.
///
/// Scans for the first `{` or `[` and walks forward to its matching close,
/// tracking string literals and escape sequences so braces inside strings
/// do not count. The balanced slice must then parse as JSON; anything else
/// is a typed error, never a silent empty value.
pub fn extract_first_json(text: &str) -> Result<serde_json::Value, ExtractError> {
    let bytes = text.as_bytes();
    let start = bytes
        .iter()
        .position(|&b| b == b'{' || b == b'[')
        .ok_or(ExtractError::NoJsonFound)?;

    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                // A stray closer before any opener cannot occur: the scan
                // starts at an opener, so depth is at least 1 here.
                depth -= 1;
                if depth == 0 {
                    let candidate = &text[start..start + offset + 1];
                    let value = serde_json::from_str(candidate)?;
                    return Ok(value);
                }
            }
            _ => {}
        }
    }

    Err(ExtractError::Unbalanced { start })
}
