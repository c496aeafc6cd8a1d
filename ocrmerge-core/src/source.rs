use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use snafu::ResultExt;
use tracing::*;

use crate::{
    error::{InvalidEntrySnafu, OcrMergeError, ParseInputSnafu, ReadInputSnafu},
    layout::detection::{Detection, RawDetection},
};

/// Anything that can turn an input (an image, a file, a request body) into raw detections.
///
/// The OCR engine is injected through this trait rather than held as global
/// state; see [`crate::merge::Merger::process`].
pub trait DetectionSource {
    type Input: ?Sized;

    fn detect(&mut self, input: &Self::Input) -> Result<Vec<Detection>, OcrMergeError>;
}

/// Reads detections that an OCR engine already dumped to JSON.
///
/// The document is a list whose entries take one of two shapes, see [`RawDetection`]:
/// - `[[[x, y], [x, y], [x, y], [x, y]], "text", score]`, the provider tuple
/// - `{"bbox": [[x, y], [x, y]], "text": "text", "score": score}`, a merged record
///
/// An entry matching neither shape fails with [`OcrMergeError::InvalidEntry`]
/// naming its index in the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDetectionSource;

impl JsonDetectionSource {
    /// Parses a JSON list of detections from `reader`.
    ///
    /// `origin` only names the data in error messages.
    pub fn from_reader<R: Read>(
        reader: R,
        origin: &str,
    ) -> Result<Vec<Detection>, OcrMergeError> {
        let entries: Vec<serde_json::Value> =
            serde_json::from_reader(reader).context(ParseInputSnafu { path: origin })?;

        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value::<RawDetection>(entry)
                    .map(Detection::from)
                    .context(InvalidEntrySnafu {
                        path: origin,
                        index,
                    })
            })
            .collect()
    }
}

impl DetectionSource for JsonDetectionSource {
    type Input = Path;

    fn detect(&mut self, input: &Path) -> Result<Vec<Detection>, OcrMergeError> {
        let path = input.display().to_string();
        info!("Loading detections from: {}", path);

        let file = File::open(input).context(ReadInputSnafu { path: &path })?;
        let detections = Self::from_reader(BufReader::new(file), &path)?;

        info!("Loaded {} raw detections", detections.len());
        Ok(detections)
    }
}
