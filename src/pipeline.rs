//! Reflow pipeline: normalize → sort → group → emit.
//!
//! Every call works on its own data; a [`Reflower`] holds only its config and
//! can be shared freely between concurrent requests.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ReflowConfig;
use crate::error::Result;
use crate::fragment::Fragment;
use crate::layout::{group_paragraphs, sort_reading_order, Document};
use crate::markdown::to_markdown;
use crate::ocr::{Backend, EngineHandle, OcrEngine, RawRecognition};
use crate::preprocess::decode_and_binarize;

/// Output of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct Reflowed {
    pub backend: Backend,
    /// Fragments in reading order; empty for geometry-free backends.
    pub fragments: Vec<Fragment>,
    pub document: Document,
    pub markdown: String,
}

#[derive(Debug, Clone, Default)]
pub struct Reflower {
    config: ReflowConfig,
}

impl Reflower {
    pub fn new(config: ReflowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReflowConfig {
        &self.config
    }

    /// Reflow raw backend output. Malformed input yields an error and no
    /// partial document.
    pub fn reflow(&self, backend: Backend, raw: &Value) -> Result<Reflowed> {
        let recognition = backend.normalize(raw)?;
        Ok(self.reflow_recognition(backend, recognition))
    }

    /// Reflow output that has already been normalized.
    pub fn reflow_recognition(&self, backend: Backend, recognition: RawRecognition) -> Reflowed {
        let (fragments, document) = match recognition {
            RawRecognition::Fragments(mut fragments) => {
                sort_reading_order(&mut fragments, self.config.anchor);
                let document = group_paragraphs(
                    &fragments,
                    self.config.line_gap_threshold,
                    self.config.anchor,
                );
                (fragments, document)
            }
            RawRecognition::PlainText(text) => (Vec::new(), Document::verbatim(text)),
        };

        let markdown = to_markdown(&document);
        info!(
            "Reflowed {} fragments into {} paragraphs (backend={}, anchor={:?}, line_gap={})",
            fragments.len(),
            document.len(),
            backend.name(),
            self.config.anchor,
            self.config.line_gap_threshold
        );

        Reflowed {
            backend,
            fragments,
            document,
            markdown,
        }
    }

    /// Decode an uploaded image, optionally binarize it, run the engine and
    /// reflow its output.
    pub async fn reflow_image<E: OcrEngine>(
        &self,
        engine: &EngineHandle<E>,
        image_bytes: &[u8],
    ) -> Result<Reflowed> {
        let image = if self.config.binarize {
            decode_and_binarize(image_bytes, self.config.binarize_threshold)?
        } else {
            image::load_from_memory(image_bytes)?
        };
        debug!(
            "Decoded {}x{} image (binarize={})",
            image.width(),
            image.height(),
            self.config.binarize
        );

        let engine = engine.get().await?;
        let raw = engine.recognize(&image).await?;
        self.reflow(engine.backend(), &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnchorEdge;
    use crate::error::ReflowError;
    use serde_json::json;

    #[test]
    fn test_reflow_paddle() {
        let raw = json!([
            [[[0, 50], [30, 50], [30, 60], [0, 60]], ["New", 0.9]],
            [[[40, 2], [80, 2], [80, 12], [40, 12]], ["World", 0.9]],
            [[[0, 0], [30, 0], [30, 10], [0, 10]], ["Hello", 0.9]]
        ]);
        let reflower = Reflower::new(ReflowConfig::default().with_line_gap(15.0)).unwrap();
        let out = reflower.reflow(Backend::PaddlePage, &raw).unwrap();
        assert_eq!(out.markdown, "Hello World\n\nNew");
        assert_eq!(out.fragments[0].text, "Hello");
    }

    #[test]
    fn test_reflow_paddle_pages() {
        let raw = json!([
            [[[[0, 0], [30, 0], [30, 10], [0, 10]], ["Hi", 0.9]]],
            null
        ]);
        let out = Reflower::default().reflow(Backend::Paddle, &raw).unwrap();
        assert_eq!(out.markdown, "Hi");
        let empty = Reflower::default().reflow(Backend::Paddle, &json!([null])).unwrap();
        assert_eq!(empty.markdown, "");
    }

    #[test]
    fn test_tesseract_bypasses_grouping() {
        let reflower = Reflower::default();
        let out = reflower
            .reflow(Backend::Tesseract, &json!("Line one\nLine two\n\nNext"))
            .unwrap();
        assert!(out.fragments.is_empty());
        assert_eq!(out.document.len(), 1);
        assert_eq!(out.markdown, "Line one\nLine two\n\nNext");
    }

    #[test]
    fn test_bottom_edge_config_changes_grouping() {
        // Same top edge, very different heights.
        let raw = json!([
            [[0, 0, 20, 10], ["short", 0.9]],
            [[30, 0, 50, 40], ["tall", 0.9]]
        ]);
        let top = Reflower::new(ReflowConfig::default()).unwrap();
        assert_eq!(top.reflow(Backend::PaddlePage, &raw).unwrap().document.len(), 1);

        let bottom = Reflower::new(ReflowConfig::bottom_edge()).unwrap();
        let out = bottom.reflow(Backend::PaddlePage, &raw).unwrap();
        assert_eq!(out.document.paragraph_texts(), vec!["short", "tall"]);
        assert_eq!(bottom.config().anchor, AnchorEdge::Bottom);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Reflower::new(ReflowConfig::default().with_line_gap(-3.0)).unwrap_err();
        assert!(matches!(err, ReflowError::InvalidConfig(_)));
    }
}
