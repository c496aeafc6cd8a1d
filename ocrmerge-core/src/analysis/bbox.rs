use glam::Vec2;

/// A 2D axis-aligned bounding box in image coordinates.
///
/// The origin is the top-left corner of the image with Y increasing downward,
/// so `min` is the top-left corner and `max` the bottom-right one. The
/// ordering `min <= max` holds on both axes for every value of this type: the
/// constructor sorts the corners it is given, and no method hands out mutable
/// access to them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bbox {
    min: Vec2,
    max: Vec2,
}

impl Bbox {
    /// Creates a bounding box spanning two opposite corners.
    ///
    /// The corners may be given in any order; they are normalized with a
    /// componentwise min/max.
    ///
    /// # Arguments
    /// * `a` - One corner of the rectangle
    /// * `b` - The opposite corner
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ocrmerge_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::new(Vec2::new(50.0, 10.0), Vec2::new(10.0, 0.0));
    /// assert_eq!(bbox.min(), Vec2::new(10.0, 0.0));
    /// assert_eq!(bbox.max(), Vec2::new(50.0, 10.0));
    /// ```
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Top-left corner.
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Vec2 {
        self.max
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Calculates the area of the bounding box.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ocrmerge_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::new(Vec2::ZERO, Vec2::new(4.0, 3.0));
    /// assert_eq!(bbox.area(), 12.0);
    /// ```
    pub fn area(&self) -> f32 {
        let length = self.max - self.min;

        length.x * length.y
    }

    /// Checks if this bounding box completely contains another bounding box.
    ///
    /// Edges are inclusive, so a box contains itself.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ocrmerge_core::analysis::bbox::Bbox;
    ///
    /// let outer = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    /// let inner = Bbox::new(Vec2::new(2.0, 3.0), Vec2::new(7.0, 8.0));
    ///
    /// assert!(outer.contains(&inner));
    /// assert!(!inner.contains(&outer));
    /// ```
    pub fn contains(&self, other: &Self) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    /// Creates the smallest bounding box that encompasses both this box and another.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ocrmerge_core::analysis::bbox::Bbox;
    ///
    /// let hello = Bbox::new(Vec2::new(10.0, 0.0), Vec2::new(50.0, 10.0));
    /// let world = Bbox::new(Vec2::new(10.0, 12.0), Vec2::new(50.0, 22.0));
    /// let union = hello.union(&world);
    ///
    /// assert_eq!(union.min(), Vec2::new(10.0, 0.0));
    /// assert_eq!(union.max(), Vec2::new(50.0, 22.0));
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Checks whether the vertical extents of two boxes nearly touch.
    ///
    /// True when this box's top edge is within `threshold` of the other box's
    /// bottom edge, or this box's bottom edge is within `threshold` of the
    /// other box's top edge. Both comparisons are strict, so a threshold of
    /// zero or less never matches.
    ///
    /// # Arguments
    /// * `other` - The box this one would stack above or below
    /// * `threshold` - Maximum (exclusive) distance between the facing edges
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ocrmerge_core::analysis::bbox::Bbox;
    ///
    /// let upper = Bbox::new(Vec2::new(10.0, 0.0), Vec2::new(50.0, 10.0));
    /// let lower = Bbox::new(Vec2::new(10.0, 12.0), Vec2::new(50.0, 22.0));
    ///
    /// assert!(lower.stacks_with(&upper, 5.0)); // |12 - 10| = 2
    /// assert!(!lower.stacks_with(&upper, 2.0));
    /// ```
    pub fn stacks_with(&self, other: &Self, threshold: f32) -> bool {
        (self.min.y - other.max.y).abs() < threshold
            || (self.max.y - other.min.y).abs() < threshold
    }

    /// Checks whether the left edges of two boxes are within `threshold` of each other.
    ///
    /// Only the left edges take part: this is an alignment check for lines of
    /// the same paragraph, not a horizontal overlap test.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ocrmerge_core::analysis::bbox::Bbox;
    ///
    /// let a = Bbox::new(Vec2::new(10.0, 0.0), Vec2::new(50.0, 10.0));
    /// let b = Bbox::new(Vec2::new(13.0, 12.0), Vec2::new(400.0, 22.0));
    ///
    /// assert!(a.left_aligned_with(&b, 5.0));
    /// assert!(!a.left_aligned_with(&b, 3.0));
    /// ```
    pub fn left_aligned_with(&self, other: &Self, threshold: f32) -> bool {
        (self.min.x - other.min.x).abs() < threshold
    }

    /// Corners truncated toward zero, as `[[x_min, y_min], [x_max, y_max]]`.
    ///
    /// The cast saturates: coordinates beyond the `i32` range clamp to
    /// `i32::MIN`/`i32::MAX` and NaN becomes 0. Coordinates are expected to be
    /// finite pixel positions, see [`crate::merge::merge_until_stable`].
    pub fn to_int_corners(&self) -> [[i32; 2]; 2] {
        [
            [self.min.x as i32, self.min.y as i32],
            [self.max.x as i32, self.max.y as i32],
        ]
    }
}
