use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::analysis::bbox::Bbox;

/// One OCR result: a rectangle, its recognized text and a confidence score.
///
/// Serialize through [`Detection::to_record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: Bbox,
    pub text: String,
    /// Confidence in `[0.0, 1.0]`.
    pub score: f32,
}

impl Detection {
    pub fn new(bbox: Bbox, text: impl Into<String>, score: f32) -> Self {
        Self {
            bbox,
            text: text.into(),
            score,
        }
    }

    /// Combines this detection (the anchor) with a candidate into a new value.
    ///
    /// The box becomes the union of both boxes, the text is the anchor text
    /// followed by a single space and the candidate text, and the score is the
    /// higher of the two scores.
    pub fn merged_with(&self, candidate: &Detection) -> Detection {
        Detection {
            bbox: self.bbox.union(&candidate.bbox),
            text: format!("{} {}", self.text, candidate.text),
            score: self.score.max(candidate.score),
        }
    }

    pub fn to_record(&self) -> DetectionRecord {
        DetectionRecord {
            bbox: self.bbox.to_int_corners(),
            text: self.text.clone(),
            score: self.score,
        }
    }
}

/// A detection as it arrives from an OCR provider or from a previous run.
///
/// Two JSON shapes are accepted:
/// - the provider tuple `[[[x, y], [x, y], [x, y], [x, y]], text, score]`,
///   a quadrilateral listed clockwise from the top-left corner;
/// - a merged record `{"bbox": [[x, y], [x, y]], "text": ..., "score": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDetection {
    Quad([[f32; 2]; 4], String, f32),
    Record {
        bbox: [[f32; 2]; 2],
        text: String,
        score: f32,
    },
}

impl From<RawDetection> for Detection {
    fn from(raw: RawDetection) -> Self {
        match raw {
            // Only the top-left and bottom-right points of the quad are kept.
            RawDetection::Quad(points, text, score) => Detection::new(
                Bbox::new(Vec2::from(points[0]), Vec2::from(points[2])),
                text,
                score,
            ),
            RawDetection::Record { bbox, text, score } => Detection::new(
                Bbox::new(Vec2::from(bbox[0]), Vec2::from(bbox[1])),
                text,
                score,
            ),
        }
    }
}

/// Serialized form handed to API consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionRecord {
    /// `[[x_min, y_min], [x_max, y_max]]`, truncated toward zero.
    pub bbox: [[i32; 2]; 2],
    pub text: String,
    pub score: f32,
}
