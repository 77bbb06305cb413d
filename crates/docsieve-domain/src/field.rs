//! Extracted fields and their positional sources

use serde::{Deserialize, Serialize};

/// Rectangular pixel region locating a text unit on a page image.
///
/// Coordinates are top-left (`x1`, `y1`) and bottom-right (`x2`, `y2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge in pixels
    pub x1: i32,
    /// Top edge in pixels
    pub y1: i32,
    /// Right edge in pixels
    pub x2: i32,
    /// Bottom edge in pixels
    pub y2: i32,
}

impl BoundingBox {
    /// Build a box from left/top/width/height, the shape most OCR backends emit.
    pub fn from_ltwh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w,
            y2: y + h,
        }
    }

    /// Build a box from a polygon's vertices by taking the min/max envelope.
    ///
    /// Returns `None` for an empty vertex list.
    pub fn from_vertices(vertices: &[(i32, i32)]) -> Option<Self> {
        let (first_x, first_y) = *vertices.first()?;
        let mut min_x = first_x;
        let mut max_x = first_x;
        let mut min_y = first_y;
        let mut max_y = first_y;
        for &(x, y) in &vertices[1..] {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        Some(Self::from_ltwh(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Box width in pixels.
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    /// Box height in pixels.
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// Where an extracted field was found in the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSource {
    /// 1-based page number
    pub page: u32,
    /// Bounding box on that page, when the backend supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

impl Default for FieldSource {
    fn default() -> Self {
        Self {
            page: 1,
            bbox: None,
        }
    }
}

/// A single structured field extracted from a document.
///
/// The value is never empty: fields the extractor could not fill are dropped
/// upstream rather than emitted blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    /// Field name, e.g. `invoice_number`
    pub name: String,
    /// Extracted value, non-empty
    pub value: String,
    /// Confidence in [0.0, 1.0]
    pub confidence: f64,
    /// Positional source, omitted from serialization when unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub source: Option<FieldSource>,
}

impl ExtractedField {
    /// Create a field with no positional source.
    pub fn new(name: impl Into<String>, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            confidence,
            source: None,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: from_ltwh with non-negative extent yields x1 <= x2, y1 <= y2
        #[test]
        fn test_ltwh_box_is_well_formed(
            x in -10_000i32..10_000,
            y in -10_000i32..10_000,
            w in 0i32..10_000,
            h in 0i32..10_000,
        ) {
            let bbox = BoundingBox::from_ltwh(x, y, w, h);
            prop_assert!(bbox.x1 <= bbox.x2);
            prop_assert!(bbox.y1 <= bbox.y2);
            prop_assert_eq!(bbox.width(), w);
            prop_assert_eq!(bbox.height(), h);
        }

        /// Property: the vertex envelope contains every vertex
        #[test]
        fn test_vertex_envelope_contains_vertices(
            vertices in prop::collection::vec((-5_000i32..5_000, -5_000i32..5_000), 1..12),
        ) {
            let bbox = BoundingBox::from_vertices(&vertices).unwrap();
            for (x, y) in vertices {
                prop_assert!(bbox.x1 <= x && x <= bbox.x2);
                prop_assert!(bbox.y1 <= y && y <= bbox.y2);
            }
        }
    }
}
