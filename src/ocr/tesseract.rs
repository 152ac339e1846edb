//! Tesseract-style adapter: plain text, no geometry.
//!
//! Accepts either the bare string or the `{"recognized_text": ...}` body the
//! OCR service returns.

use serde_json::Value;

use super::parse_text;
use crate::error::{ReflowError, Result};

pub fn normalize(raw: &Value) -> Result<String> {
    match raw {
        Value::Object(body) => {
            let text = body
                .get("recognized_text")
                .ok_or_else(|| ReflowError::malformed(0, "missing recognized_text field"))?;
            parse_text(0, text)
        }
        other => parse_text(0, other),
    }
}
