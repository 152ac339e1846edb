//! EasyOCR-style adapter.
//!
//! Raw shape: groups of `[region, text, confidence]` triples, flattened in
//! group order. Error indices count across groups.

use serde_json::Value;
use tracing::debug;

use super::{parse_confidence, parse_region, parse_text};
use crate::error::{ReflowError, Result};
use crate::fragment::Fragment;

pub fn normalize(raw: &Value) -> Result<Vec<Fragment>> {
    let groups = raw
        .as_array()
        .ok_or_else(|| ReflowError::malformed(0, "easyocr result is not an array of groups"))?;

    let mut fragments = Vec::new();
    for (group_num, group) in groups.iter().enumerate() {
        let triples = group.as_array().ok_or_else(|| {
            ReflowError::malformed(
                fragments.len(),
                format!("group {} is not an array", group_num),
            )
        })?;

        for triple in triples {
            let index = fragments.len();
            let parts = triple
                .as_array()
                .filter(|p| p.len() >= 2)
                .ok_or_else(|| {
                    ReflowError::malformed(index, "expected [region, text, confidence]")
                })?;

            let region = parse_region(index, &parts[0])?;
            let text = parse_text(index, &parts[1])?;
            let confidence = parse_confidence(index, parts.get(2))?;

            fragments.push(Fragment::new(region, text, confidence));
        }
    }

    debug!(
        "easyocr: normalized {} fragments from {} groups",
        fragments.len(),
        groups.len()
    );
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flattens_groups_in_order() {
        let raw = json!([
            [
                [[[0, 0], [30, 0], [30, 10], [0, 10]], "Hello", 0.99],
                [[[40, 2], [80, 2], [80, 12], [40, 12]], "World", 0.95]
            ],
            [
                [[[0, 50], [30, 50], [30, 60], [0, 60]], "New", null]
            ]
        ]);
        let fragments = normalize(&raw).unwrap();
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello", "World", "New"]);
        assert_eq!(fragments[2].confidence, None);
    }

    #[test]
    fn test_empty_groups() {
        assert!(normalize(&json!([])).unwrap().is_empty());
        assert!(normalize(&json!([[], []])).unwrap().is_empty());
    }

    #[test]
    fn test_error_index_counts_across_groups() {
        let raw = json!([
            [[[[0, 0], [1, 0], [1, 1], [0, 1]], "a", 0.9]],
            [
                [[[0, 5], [1, 5], [1, 6], [0, 6]], "b", 0.9],
                [[[0, 9], [1, 9], [1, 10], [0, 10]], null, 0.9]
            ]
        ]);
        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, ReflowError::MalformedResult { index: 2, .. }));
    }

    #[test]
    fn test_flat_triples_are_not_groups() {
        // A flat list of triples is the wrong shape for this backend.
        let raw = json!([[[[0, 0], [1, 0], [1, 1], [0, 1]], "a", 0.9]]);
        assert!(normalize(&raw).is_err());
    }
}
