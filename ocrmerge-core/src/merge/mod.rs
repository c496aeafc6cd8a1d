pub mod config;
pub mod merger;
pub mod pass;

pub use config::{MergeConfig, MergeConfigBuilder, MergeConfigBuilderError};
pub use merger::{MergeReport, Merger};
pub use pass::{filter_by_score, is_mergeable, merge_once, merge_until_stable};
