//! Canonical fragment types shared by every OCR backend adapter.

use serde::{Deserialize, Serialize};

use crate::config::AnchorEdge;

/// A 2-D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding region of a fragment: a quadrilateral/polygon or an expanded box.
///
/// Always holds at least one point; constructors return `None` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Region {
    points: Vec<Point>,
}

impl Region {
    /// Build a region from polygon points. Rejects empty or non-finite input.
    pub fn from_points(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return None;
        }
        Some(Self { points })
    }

    /// Build a region from an axis-aligned box, expanded clockwise from top-left.
    pub fn from_box(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Option<Self> {
        Self::from_points(vec![
            Point::new(x_min, y_min),
            Point::new(x_max, y_min),
            Point::new(x_max, y_max),
            Point::new(x_min, y_max),
        ])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Top edge (minimum y).
    pub fn top(&self) -> f64 {
        self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min)
    }

    /// Bottom edge (maximum y).
    pub fn bottom(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Left edge (minimum x).
    pub fn left(&self) -> f64 {
        self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min)
    }
}

/// One recognized text unit as produced by a backend adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    pub region: Region,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Fragment {
    pub fn new(region: Region, text: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            region,
            text: text.into(),
            confidence,
        }
    }

    /// Vertical anchor used for both ordering and gap measurement.
    pub fn anchor_y(&self, edge: AnchorEdge) -> f64 {
        match edge {
            AnchorEdge::Top => self.region.top(),
            AnchorEdge::Bottom => self.region.bottom(),
        }
    }

    /// Horizontal anchor (left edge).
    pub fn anchor_x(&self) -> f64 {
        self.region.left()
    }
}
