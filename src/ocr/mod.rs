//! OCR backend abstraction.
//!
//! Defines the [`OcrEngine`] trait, the closed set of supported [`Backend`]s and
//! the adapters that normalize each backend's raw output into [`Fragment`]s.
//! The adapter is always selected from the backend identity, never by probing
//! the shape of the payload.

pub mod easyocr;
pub mod handle;
pub mod paddle;
pub mod tesseract;

pub use handle::EngineHandle;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReflowError, Result};
use crate::fragment::{Fragment, Point, Region};

/// Known backend identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// PaddleOCR page list: `[[[region, [text, confidence]], ...] | null, ...]`
    Paddle,
    /// A single PaddleOCR page: `[[region, [text, confidence]], ...]`
    PaddlePage,
    /// `[[[region, text, confidence], ...], ...]`, one extra nesting level.
    EasyOcr,
    /// Plain string, no geometry.
    Tesseract,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paddle => "paddle",
            Self::PaddlePage => "paddle_page",
            Self::EasyOcr => "easyocr",
            Self::Tesseract => "tesseract",
        }
    }

    /// Parse a backend name (as used on the command line) into a backend.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "paddle" | "paddleocr" => Some(Self::Paddle),
            "paddle_page" => Some(Self::PaddlePage),
            "easyocr" | "easy_ocr" => Some(Self::EasyOcr),
            "tesseract" => Some(Self::Tesseract),
            _ => None,
        }
    }

    /// Normalize this backend's raw output.
    pub fn normalize(&self, raw: &Value) -> Result<RawRecognition> {
        match self {
            Self::Paddle => paddle::normalize(raw).map(RawRecognition::Fragments),
            Self::PaddlePage => paddle::normalize_page(raw).map(RawRecognition::Fragments),
            Self::EasyOcr => easyocr::normalize(raw).map(RawRecognition::Fragments),
            Self::Tesseract => tesseract::normalize(raw).map(RawRecognition::PlainText),
        }
    }
}

/// Normalized backend output.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecognition {
    /// Geometric fragments, in backend emission order.
    Fragments(Vec<Fragment>),
    /// Text with no geometry; already laid out by the engine.
    PlainText(String),
}

/// Async trait implemented by each OCR engine wrapper.
///
/// `recognize` returns the engine's native result as JSON; the pipeline picks
/// the adapter from [`OcrEngine::backend`].
#[async_trait::async_trait]
pub trait OcrEngine: Send + Sync {
    fn backend(&self) -> Backend;
    async fn recognize(&self, image: &DynamicImage) -> anyhow::Result<Value>;
}

// ── Shared field parsers ────────────────────────────────────────────────────

/// Interpret a raw region: a list of `[x, y]` points or a flat
/// `[x_min, y_min, x_max, y_max]` box.
pub(crate) fn parse_region(index: usize, raw: &Value) -> Result<Region> {
    let items = raw
        .as_array()
        .ok_or_else(|| ReflowError::malformed(index, "region is not an array"))?;

    if items.is_empty() {
        return Err(ReflowError::malformed(index, "region has no points"));
    }

    if items.iter().all(Value::is_number) {
        if items.len() != 4 {
            return Err(ReflowError::malformed(
                index,
                format!("box region needs 4 numbers, got {}", items.len()),
            ));
        }
        let n: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
        return Region::from_box(n[0], n[1], n[2], n[3])
            .ok_or_else(|| ReflowError::malformed(index, "box region is not finite"));
    }

    let mut points = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let coords = item.as_array().filter(|c| c.len() >= 2).ok_or_else(|| {
            ReflowError::malformed(index, format!("region point {} is not an [x, y] pair", i))
        })?;
        match (coords[0].as_f64(), coords[1].as_f64()) {
            (Some(x), Some(y)) => points.push(Point::new(x, y)),
            _ => {
                return Err(ReflowError::malformed(
                    index,
                    format!("region point {} has non-numeric coordinates", i),
                ))
            }
        }
    }

    Region::from_points(points)
        .ok_or_else(|| ReflowError::malformed(index, "region has non-finite coordinates"))
}

pub(crate) fn parse_text(index: usize, raw: &Value) -> Result<String> {
    raw.as_str()
        .map(str::to_string)
        .ok_or_else(|| ReflowError::malformed(index, "text is not a string"))
}

/// Absent or `null` confidence stays `None`.
pub(crate) fn parse_confidence(index: usize, raw: Option<&Value>) -> Result<Option<f64>> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| ReflowError::malformed(index, "confidence is not a number")),
    }
}
