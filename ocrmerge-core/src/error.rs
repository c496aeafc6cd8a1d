use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum OcrMergeError {
    #[snafu(display("Read `{}` error: {}", path, source))]
    ReadInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Parse detections from `{}` error: {}", path, source))]
    ParseInput {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display(
        "Entry {} in `{}` is neither a [quad, text, score] tuple nor a {{bbox, text, score}} record: {}",
        index,
        path,
        source
    ))]
    InvalidEntry {
        source: serde_json::Error,
        path: String,
        index: usize,
    },
    #[snafu(display("Write `{}` error: {}", path, source))]
    WriteOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Output `{}` would be written by more than one input", path))]
    DuplicateOutput { path: String },
    #[snafu(display("Serialize detections error: {}", source))]
    Serialize { source: serde_json::Error },
    #[snafu(display("Invalid merge config: {}", source))]
    Config {
        source: crate::merge::MergeConfigBuilderError,
    },
}
