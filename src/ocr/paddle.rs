//! PaddleOCR-style adapter.
//!
//! The engine returns one entry per page, each a list of
//! `[region, [text, confidence]]` lines; a page without detections comes back
//! as `null`. [`normalize`] reads that page list, [`normalize_page`] a single
//! page's lines. Error indices count lines across pages.

use serde_json::Value;
use tracing::debug;

use super::{parse_confidence, parse_region, parse_text};
use crate::error::{ReflowError, Result};
use crate::fragment::Fragment;

/// Normalize the engine's page list.
pub fn normalize(raw: &Value) -> Result<Vec<Fragment>> {
    let pages = match raw {
        Value::Null => return Ok(Vec::new()),
        Value::Array(pages) => pages,
        _ => return Err(ReflowError::malformed(0, "paddle result is not a page list")),
    };

    let mut fragments = Vec::new();
    for (page_num, page) in pages.iter().enumerate() {
        match page {
            Value::Null => debug!("paddle: page {} has no text", page_num),
            Value::Array(lines) => push_lines(lines, &mut fragments)?,
            _ => {
                return Err(ReflowError::malformed(
                    fragments.len(),
                    format!("page {} is neither a line list nor null", page_num),
                ))
            }
        }
    }

    debug!(
        "paddle: normalized {} fragments from {} pages",
        fragments.len(),
        pages.len()
    );
    Ok(fragments)
}

/// Normalize one page: `[[region, [text, confidence]], ...]`, or `null`.
pub fn normalize_page(raw: &Value) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::new();
    match raw {
        Value::Null => {}
        Value::Array(lines) => push_lines(lines, &mut fragments)?,
        _ => return Err(ReflowError::malformed(0, "paddle page is not a line list")),
    }
    debug!("paddle: normalized {} fragments from one page", fragments.len());
    Ok(fragments)
}

fn push_lines(lines: &[Value], fragments: &mut Vec<Fragment>) -> Result<()> {
    for line in lines {
        let index = fragments.len();
        let parts = line
            .as_array()
            .filter(|p| p.len() >= 2)
            .ok_or_else(|| ReflowError::malformed(index, "expected [region, [text, confidence]]"))?;

        let region = parse_region(index, &parts[0])?;
        let recognition = parts[1]
            .as_array()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ReflowError::malformed(index, "expected [text, confidence] pair"))?;
        let text = parse_text(index, &recognition[0])?;
        let confidence = parse_confidence(index, recognition.get(1))?;

        fragments.push(Fragment::new(region, text, confidence));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_page_lines() {
        let raw = json!([
            [[[10, 5], [90, 5], [90, 20], [10, 20]], ["Invoice", 0.98]],
            [[[10, 40], [60, 40], [60, 55], [10, 55]], ["Total", 0.91]]
        ]);
        let fragments = normalize_page(&raw).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Invoice");
        assert_eq!(fragments[0].confidence, Some(0.98));
        assert_eq!(fragments[1].region.top(), 40.0);
    }

    #[test]
    fn test_normalize_engine_page_list() {
        let raw = json!([
            [[[[0, 0], [30, 0], [30, 10], [0, 10]], ["Hi", 0.9]]],
            null,
            [[[[0, 40], [30, 40], [30, 50], [0, 50]], ["there", 0.8]]]
        ]);
        let fragments = normalize(&raw).unwrap();
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Hi", "there"]);
    }

    #[test]
    fn test_page_without_text() {
        assert!(normalize(&json!([null])).unwrap().is_empty());
        assert!(normalize(&json!([[]])).unwrap().is_empty());
        assert!(normalize(&Value::Null).unwrap().is_empty());
        assert!(normalize_page(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_missing_confidence_is_none() {
        let raw = json!([[[[[0, 0], [4, 0], [4, 4], [0, 4]], ["x"]]]]);
        let fragments = normalize(&raw).unwrap();
        assert_eq!(fragments[0].confidence, None);
    }

    #[test]
    fn test_error_index_counts_across_pages() {
        let raw = json!([
            [[[[0, 0], [4, 0], [4, 4], [0, 4]], ["ok", 0.9]]],
            null,
            [
                [[[0, 9], [4, 9], [4, 12], [0, 12]], ["ok", 0.9]],
                [[], ["x", 0.5]]
            ]
        ]);
        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, ReflowError::MalformedResult { index: 2, .. }));
    }

    #[test]
    fn test_non_string_text_rejected() {
        let raw = json!([[[[0, 0], [4, 0], [4, 4], [0, 4]], [17, 0.9]]]);
        assert!(matches!(
            normalize_page(&raw).unwrap_err(),
            ReflowError::MalformedResult { index: 0, .. }
        ));
    }

    #[test]
    fn test_single_page_is_not_a_page_list() {
        // A bare line list is the wrong shape for the engine form.
        let raw = json!([[[[0, 0], [4, 0], [4, 4], [0, 4]], ["x", 0.9]]]);
        assert!(normalize(&raw).is_err());
    }
}
