use rayon::prelude::*;
use tracing::*;

use crate::{
    error::OcrMergeError,
    layout::detection::{Detection, DetectionRecord},
    source::DetectionSource,
};

use super::{
    config::MergeConfig,
    pass::{filter_by_score, merge_to_fixed_point},
};

/// Result of one merge run: the kept detections plus counts for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// Merged detections that passed the score filter, in anchor order.
    pub detections: Vec<Detection>,
    /// Number of detections handed in.
    pub raw_count: usize,
    /// Number of detections after merging, before filtering.
    pub merged_count: usize,
    /// Merge passes run until the count stopped shrinking.
    pub passes: usize,
}

impl MergeReport {
    pub fn kept_count(&self) -> usize {
        self.detections.len()
    }

    pub fn records(&self) -> Vec<DetectionRecord> {
        self.detections.iter().map(Detection::to_record).collect()
    }
}

/// Merges fragmented detections into text blocks and applies the score filter.
///
/// Holds no state besides its configuration, so one instance can be shared
/// across threads and requests.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    config: MergeConfig,
}

impl Merger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merges `detections` to a fixed point, then drops those scoring at or
    /// below the configured score threshold.
    pub fn merge(&self, detections: &[Detection]) -> MergeReport {
        let (merged, passes) = merge_to_fixed_point(detections, &self.config);
        let merged_count = merged.len();
        let kept = filter_by_score(merged, self.config.score_threshold);

        info!(
            "Merged {} detections into {} blocks in {} passes, kept {} above score {}",
            detections.len(),
            merged_count,
            passes,
            kept.len(),
            self.config.score_threshold
        );
        if kept.is_empty() && !detections.is_empty() {
            warn!("No detections left after score filtering");
        }

        MergeReport {
            detections: kept,
            raw_count: detections.len(),
            merged_count,
            passes,
        }
    }

    /// Pulls detections from `source` and merges them.
    pub fn process<S: DetectionSource>(
        &self,
        source: &mut S,
        input: &S::Input,
    ) -> Result<MergeReport, OcrMergeError> {
        let detections = source.detect(input)?;
        debug!("Detection source returned {} detections", detections.len());

        Ok(self.merge(&detections))
    }

    /// Merges independent detection sets (one per image or page) in parallel.
    ///
    /// Each set is merged on its own; reports come back in input order.
    pub fn merge_batch(&self, batches: &[Vec<Detection>]) -> Vec<MergeReport> {
        batches
            .par_iter()
            .map(|detections| self.merge(detections))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::analysis::bbox::Bbox;
    use crate::error::ReadInputSnafu;
    use snafu::ResultExt;

    fn det(min: (f32, f32), max: (f32, f32), text: &str, score: f32) -> Detection {
        Detection::new(
            Bbox::new(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1)),
            text,
            score,
        )
    }

    fn merger(vertical: f32, horizontal: f32, score: f32) -> Merger {
        Merger::new(MergeConfig {
            vertical_threshold: vertical,
            horizontal_threshold: horizontal,
            score_threshold: score,
        })
    }

    /// In-memory stand-in for an OCR provider.
    struct FixedSource {
        detections: Vec<Detection>,
        calls: usize,
    }

    impl DetectionSource for FixedSource {
        type Input = str;

        fn detect(&mut self, input: &str) -> Result<Vec<Detection>, OcrMergeError> {
            self.calls += 1;
            if input == "missing" {
                return Err(std::io::Error::from(std::io::ErrorKind::NotFound))
                    .context(ReadInputSnafu { path: input });
            }
            Ok(self.detections.clone())
        }
    }

    #[test]
    fn test_merge_reports_counts() {
        let detections = vec![
            det((10.0, 0.0), (50.0, 10.0), "foo", 0.05),
            det((10.0, 12.0), (50.0, 22.0), "bar", 0.95),
            det((300.0, 500.0), (350.0, 510.0), "noise", 0.02),
        ];

        let report = merger(5.0, 5.0, 0.10).merge(&detections);
        assert_eq!(report.raw_count, 3);
        assert_eq!(report.merged_count, 2);
        assert_eq!(report.kept_count(), 1);
        assert_eq!(report.passes, 2);
        assert_eq!(report.detections[0].text, "foo bar");
        assert_eq!(report.detections[0].score, 0.95);
    }

    #[test]
    fn test_merge_empty_input() {
        let report = Merger::default().merge(&[]);
        assert!(report.detections.is_empty());
        assert_eq!(report.raw_count, 0);
        assert_eq!(report.merged_count, 0);
        assert_eq!(report.passes, 0);
    }

    #[test]
    fn test_report_records() {
        let detections = vec![
            det((10.0, 0.0), (50.0, 10.0), "Hello", 0.5),
            det((10.0, 12.0), (50.5, 22.9), "World", 0.25),
        ];

        let records = merger(5.0, 5.0, 0.10).merge(&detections).records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bbox, [[10, 0], [50, 22]]);
        assert_eq!(records[0].text, "Hello World");
        assert_eq!(records[0].score, 0.5);
    }

    #[test]
    fn test_report_serializes_as_records() {
        let detections = vec![det((10.7, 0.2), (50.5, 22.9), "Hello", 0.5)];

        let value = serde_json::to_value(merger(5.0, 5.0, 0.10).merge(&detections).records())
            .unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"bbox": [[10, 0], [50, 22]], "text": "Hello", "score": 0.5}])
        );
    }

    #[test]
    fn test_process_pulls_from_source() {
        let mut source = FixedSource {
            detections: vec![
                det((10.0, 0.0), (50.0, 10.0), "Hello", 0.9),
                det((10.0, 12.0), (50.0, 22.0), "World", 0.8),
            ],
            calls: 0,
        };

        let report = merger(5.0, 5.0, 0.10)
            .process(&mut source, "page-1")
            .unwrap();
        assert_eq!(source.calls, 1);
        assert_eq!(report.kept_count(), 1);
        assert_eq!(report.detections[0].text, "Hello World");
    }

    #[test]
    fn test_process_propagates_source_error() {
        let mut source = FixedSource {
            detections: Vec::new(),
            calls: 0,
        };

        let result = Merger::default().process(&mut source, "missing");
        assert!(matches!(result, Err(OcrMergeError::ReadInput { .. })));
    }

    #[test]
    fn test_merge_batch_keeps_order_and_independence() {
        let stacked = vec![
            det((10.0, 0.0), (50.0, 10.0), "Hello", 0.9),
            det((10.0, 12.0), (50.0, 22.0), "World", 0.8),
        ];
        let apart = vec![
            det((10.0, 0.0), (50.0, 10.0), "left", 0.9),
            det((100.0, 12.0), (140.0, 22.0), "right", 0.8),
        ];
        let batches = vec![stacked.clone(), Vec::new(), apart.clone()];

        let m = merger(5.0, 5.0, 0.10);
        let reports = m.merge_batch(&batches);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0], m.merge(&stacked));
        assert!(reports[1].detections.is_empty());
        assert_eq!(reports[2], m.merge(&apart));
        assert_eq!(reports[2].kept_count(), 2);
    }

    #[test]
    fn test_merger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Merger>();
        assert_send_sync::<Detection>();
    }
}
