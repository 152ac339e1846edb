//! Reading-order sorting and paragraph aggregation.
//!
//! Fragments are ordered top-to-bottom, then left-to-right, and consecutive
//! fragments are merged into a paragraph until the vertical distance between
//! their anchors exceeds the line-gap threshold. The pass is greedy: a
//! boundary, once placed, is never revisited. Right-to-left scripts get no
//! special treatment.

use serde::Serialize;

use crate::config::AnchorEdge;
use crate::fragment::Fragment;

/// A run of fragment texts judged to belong to the same visual block.
///
/// Holds at least one non-empty text: a run made only of empty fragments
/// carries nothing to read and is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Paragraph {
    texts: Vec<String>,
}

impl Paragraph {
    /// `None` for a run with no non-empty text.
    pub fn new(texts: Vec<String>) -> Option<Self> {
        if texts.iter().all(String::is_empty) {
            None
        } else {
            Some(Self { texts })
        }
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Fragment texts joined by a single space.
    pub fn text(&self) -> String {
        self.texts.join(" ")
    }
}

/// Ordered paragraphs produced by one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Wrap text that already carries its own layout (no geometry available).
    pub fn verbatim(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            paragraphs: vec![Paragraph { texts: vec![text] }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Each paragraph's joined text, in order.
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::text).collect()
    }
}

/// Stable sort by `(anchor_y, anchor_x)`; equal keys keep emission order.
pub fn sort_reading_order(fragments: &mut [Fragment], edge: AnchorEdge) {
    fragments.sort_by(|a, b| {
        a.anchor_y(edge)
            .total_cmp(&b.anchor_y(edge))
            .then_with(|| a.anchor_x().total_cmp(&b.anchor_x()))
    });
}

/// Merge sorted fragments into paragraphs.
///
/// A new paragraph starts whenever `|anchor_y - last_anchor_y| > threshold`,
/// so a threshold of 0 splits every distinct y while equal anchors merge.
pub fn group_paragraphs(sorted: &[Fragment], threshold: f64, edge: AnchorEdge) -> Document {
    let mut paragraphs = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut last_y: Option<f64> = None;

    for fragment in sorted {
        let y = fragment.anchor_y(edge);

        if let Some(prev) = last_y {
            if (y - prev).abs() > threshold {
                paragraphs.extend(Paragraph::new(std::mem::take(&mut current)));
            }
        }

        current.push(fragment.text.clone());
        last_y = Some(y);
    }

    paragraphs.extend(Paragraph::new(current));
    Document { paragraphs }
}
