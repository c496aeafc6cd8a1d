/// Default maximum distance between the facing horizontal edges of two boxes
/// for them to count as vertically adjacent.
///
/// Distances are in image pixels. The comparison is strict, so two boxes whose
/// edges are exactly this far apart are not merged.
pub const DEFAULT_VERTICAL_THRESHOLD: f32 = 35.0;

/// Default maximum distance between the left edges of two boxes for them to
/// count as aligned.
///
/// Paragraph lines usually share a left margin, so this check is about
/// alignment rather than horizontal overlap.
pub const DEFAULT_HORIZONTAL_THRESHOLD: f32 = 35.0;

/// Default minimum confidence for a merged detection to be kept.
///
/// Filtering uses a strict `>` and runs after merging converges, so a low
/// confidence fragment survives when it merges with a confident neighbour.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.10;

/// Vertical threshold used when inspecting a single image by hand.
pub const INSPECTION_VERTICAL_THRESHOLD: f32 = 5.0;

/// Horizontal threshold used when inspecting a single image by hand.
pub const INSPECTION_HORIZONTAL_THRESHOLD: f32 = 50.0;
