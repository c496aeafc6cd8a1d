use tracing::*;

use crate::layout::detection::Detection;

use super::config::MergeConfig;

/// Checks whether `candidate` may be merged into `anchor`.
///
/// Both conditions must hold: the vertical extents nearly touch (in either
/// stacking direction) and the left edges are aligned. Comparisons are strict.
pub fn is_mergeable(anchor: &Detection, candidate: &Detection, config: &MergeConfig) -> bool {
    candidate
        .bbox
        .stacks_with(&anchor.bbox, config.vertical_threshold)
        && candidate
            .bbox
            .left_aligned_with(&anchor.bbox, config.horizontal_threshold)
}

/// Runs a single first-fit merge pass over `detections`.
///
/// # Algorithm
/// 1. Walk the detections in input order, keeping an ordered list of anchors
/// 2. Compare each candidate with the anchors in the order they were created
/// 3. Merge it into the first anchor that satisfies [`is_mergeable`] and stop
/// 4. Otherwise append it as a new anchor
///
/// An anchor that grows during the pass is never re-checked against the
/// anchors after it, so chains can need further passes
/// (see [`merge_until_stable`]).
///
/// The returned anchors keep the order in which they were created and the
/// result is never longer than the input.
pub fn merge_once(detections: &[Detection], config: &MergeConfig) -> Vec<Detection> {
    let mut anchors: Vec<Detection> = Vec::with_capacity(detections.len());

    for candidate in detections {
        match anchors
            .iter()
            .position(|anchor| is_mergeable(anchor, candidate, config))
        {
            Some(index) => anchors[index] = anchors[index].merged_with(candidate),
            None => anchors.push(candidate.clone()),
        }
    }

    anchors
}

/// Repeats [`merge_once`] until a pass no longer reduces the number of detections.
///
/// Empty input is returned as is without running a pass.
///
/// Coordinates and scores are expected to be finite. Nothing checks this;
/// NaN values give unspecified groupings but never a panic, and
/// [`Bbox::to_int_corners`](crate::analysis::bbox::Bbox::to_int_corners)
/// later saturates out-of-range coordinates.
pub fn merge_until_stable(detections: &[Detection], config: &MergeConfig) -> Vec<Detection> {
    merge_to_fixed_point(detections, config).0
}

/// Same as [`merge_until_stable`], also returning the number of passes run.
pub(crate) fn merge_to_fixed_point(
    detections: &[Detection],
    config: &MergeConfig,
) -> (Vec<Detection>, usize) {
    if detections.is_empty() {
        return (Vec::new(), 0);
    }

    let mut current = detections.to_vec();
    let mut passes = 0;

    loop {
        let merged = merge_once(&current, config);
        passes += 1;
        debug!(
            "Merge pass {} reduced {} detections to {}",
            passes,
            current.len(),
            merged.len()
        );

        if merged.len() == current.len() {
            return (merged, passes);
        }
        current = merged;
    }
}

/// Keeps the detections whose score is strictly above `threshold`, in order.
///
/// Run this on the output of [`merge_until_stable`], not before it, so that a
/// weak fragment can still be rescued by a confident neighbour.
pub fn filter_by_score(detections: Vec<Detection>, threshold: f32) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|detection| detection.score > threshold)
        .collect()
}
