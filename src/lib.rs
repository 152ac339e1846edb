//! OCR Reflow - rebuild reading-order paragraphs from positioned OCR fragments.
//!
//! Raw engine output is normalized into [`Fragment`]s by a backend-specific
//! adapter, sorted top-to-bottom and left-to-right, grouped into paragraphs by
//! vertical gap, and emitted as markdown.

pub mod config;
pub mod error;
pub mod fragment;
pub mod layout;
pub mod markdown;
pub mod ocr;
pub mod pipeline;
pub mod preprocess;

pub use config::{AnchorEdge, ReflowConfig};
pub use error::{ReflowError, Result};
pub use fragment::{Fragment, Point, Region};
pub use layout::{Document, Paragraph};
pub use ocr::{Backend, EngineHandle, OcrEngine, RawRecognition};
pub use pipeline::{Reflowed, Reflower};
