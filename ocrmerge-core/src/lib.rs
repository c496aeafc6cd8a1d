pub mod analysis;
pub mod consts;
pub mod error;
pub mod layout;
pub mod merge;
pub mod source;

// Re-export commonly used types
pub use analysis::bbox::Bbox;
pub use error::OcrMergeError;
pub use layout::detection::{Detection, DetectionRecord, RawDetection};
pub use merge::{
    MergeConfig, MergeConfigBuilder, MergeReport, Merger, filter_by_score, merge_once,
    merge_until_stable,
};
pub use source::{DetectionSource, JsonDetectionSource};
