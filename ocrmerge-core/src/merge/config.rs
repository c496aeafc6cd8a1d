use derive_builder::Builder;

use crate::consts::*;

/// Thresholds that drive merging and the final score filter.
///
/// All distances are in image pixels. Negative thresholds are accepted and
/// simply never match; non-finite ones are rejected by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct MergeConfig {
    /// Maximum (exclusive) gap between facing horizontal edges.
    #[builder(default = "DEFAULT_VERTICAL_THRESHOLD")]
    pub vertical_threshold: f32,
    /// Maximum (exclusive) distance between left edges.
    #[builder(default = "DEFAULT_HORIZONTAL_THRESHOLD")]
    pub horizontal_threshold: f32,
    /// Detections must score strictly above this to be kept after merging.
    #[builder(default = "DEFAULT_SCORE_THRESHOLD")]
    pub score_threshold: f32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            vertical_threshold: DEFAULT_VERTICAL_THRESHOLD,
            horizontal_threshold: DEFAULT_HORIZONTAL_THRESHOLD,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

impl MergeConfig {
    /// Tighter vertical and looser horizontal thresholds for checking a
    /// single image by eye.
    pub fn inspection() -> Self {
        Self {
            vertical_threshold: INSPECTION_VERTICAL_THRESHOLD,
            horizontal_threshold: INSPECTION_HORIZONTAL_THRESHOLD,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

impl MergeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("vertical_threshold", self.vertical_threshold),
            ("horizontal_threshold", self.horizontal_threshold),
            ("score_threshold", self.score_threshold),
        ];

        for (name, value) in fields {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(format!("{} must be a finite number", name));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let built = MergeConfigBuilder::default().build().unwrap();
        assert_eq!(built, MergeConfig::default());
        assert_eq!(built.vertical_threshold, 35.0);
        assert_eq!(built.horizontal_threshold, 35.0);
        assert_eq!(built.score_threshold, 0.10);
    }

    #[test]
    fn test_builder_overrides() {
        let built = MergeConfigBuilder::default()
            .vertical_threshold(5.0)
            .score_threshold(0.5)
            .build()
            .unwrap();
        assert_eq!(built.vertical_threshold, 5.0);
        assert_eq!(built.horizontal_threshold, DEFAULT_HORIZONTAL_THRESHOLD);
        assert_eq!(built.score_threshold, 0.5);
    }

    #[test]
    fn test_builder_accepts_negative_thresholds() {
        let built = MergeConfigBuilder::default()
            .vertical_threshold(-1.0)
            .horizontal_threshold(-1.0)
            .build();
        assert!(built.is_ok());
    }

    #[test]
    fn test_builder_rejects_non_finite() {
        let nan = MergeConfigBuilder::default()
            .vertical_threshold(f32::NAN)
            .build();
        let err = nan.unwrap_err().to_string();
        assert!(err.contains("vertical_threshold"));

        let inf = MergeConfigBuilder::default()
            .score_threshold(f32::INFINITY)
            .build();
        assert!(inf.is_err());
    }

    #[test]
    fn test_inspection_preset() {
        let config = MergeConfig::inspection();
        assert_eq!(config.vertical_threshold, 5.0);
        assert_eq!(config.horizontal_threshold, 50.0);
        assert_eq!(config.score_threshold, DEFAULT_SCORE_THRESHOLD);
    }
}
