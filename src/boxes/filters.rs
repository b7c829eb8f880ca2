//! Stateless predicates for subsetting datasets.
//!
//! Filters are plain structs with a `matches` method; combine them at the
//! call site with ordinary boolean operators.

use super::record::{Annotation, BoxGeometry};

/// Accepts boxes that lie fully inside a rectangular region.
///
/// All four edges are inclusive.
#[derive(Clone, Copy, Debug)]
pub struct ImageBoundsFilter {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl ImageBoundsFilter {
    /// Creates a filter for the region `(min_x, min_y)` to `(max_x, max_y)`.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Whether the box lies fully inside the region.
    pub fn matches(&self, geometry: &BoxGeometry) -> bool {
        geometry.x_top_left >= self.min_x
            && geometry.y_top_left >= self.min_y
            && geometry.x_bottom_right() <= self.max_x
            && geometry.y_bottom_right() <= self.max_y
    }
}

/// Accepts annotations whose visible fraction lies in a closed range.
///
/// Non-occluded annotations pass unconditionally; for occluded ones the
/// visible fraction is `1 - occluded_fraction`.
#[derive(Clone, Copy, Debug)]
pub struct OcclusionAreaFilter {
    min_visible: f64,
    max_visible: f64,
}

impl OcclusionAreaFilter {
    /// Creates a filter for visible fractions in `[min_visible, max_visible]`.
    pub fn new(min_visible: f64, max_visible: f64) -> Self {
        Self {
            min_visible,
            max_visible,
        }
    }

    /// Whether the annotation is unoccluded or visible enough.
    pub fn matches(&self, anno: &Annotation) -> bool {
        if !anno.occluded() {
            return true;
        }
        let visible_fraction = 1.0 - anno.occluded_fraction;
        visible_fraction >= self.min_visible && visible_fraction <= self.max_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_bounds_box() -> BoxGeometry {
        BoxGeometry::new("", 2.0, 2.0, 5.0, 10.0)
    }

    #[test]
    fn bounds_accepts_contained_box() {
        let filter = ImageBoundsFilter::new(1.0, 1.0, 9.0, 13.0);
        assert!(filter.matches(&in_bounds_box()));
    }

    #[test]
    fn bounds_accepts_box_touching_every_edge() {
        let filter = ImageBoundsFilter::new(1.0, 1.0, 9.0, 13.0);
        let geometry = BoxGeometry::new("", 1.0, 1.0, 8.0, 12.0);
        assert!(filter.matches(&geometry));
    }

    #[test]
    fn bounds_rejects_box_past_each_edge() {
        let filter = ImageBoundsFilter::new(1.0, 1.0, 9.0, 13.0);

        let mut left = in_bounds_box();
        left.x_top_left = 0.0;
        assert!(!filter.matches(&left));

        let mut right = in_bounds_box();
        right.width = 9.0;
        assert!(!filter.matches(&right));

        let mut top = in_bounds_box();
        top.y_top_left = 0.0;
        assert!(!filter.matches(&top));

        let mut bottom = in_bounds_box();
        bottom.height = 13.0;
        assert!(!filter.matches(&bottom));
    }

    #[test]
    fn occlusion_accepts_unoccluded() {
        let filter = OcclusionAreaFilter::new(0.5, 0.7);
        assert!(filter.matches(&Annotation::new()));
    }

    #[test]
    fn occlusion_accepts_visible_fraction_in_range() {
        let filter = OcclusionAreaFilter::new(0.5, 0.7);
        let mut anno = Annotation::new();
        anno.occluded_fraction = 1.0 - 0.6;
        assert!(filter.matches(&anno));
    }

    #[test]
    fn occlusion_range_is_inclusive() {
        let filter = OcclusionAreaFilter::new(0.5, 0.7);
        let mut anno = Annotation::new();

        anno.occluded_fraction = 1.0 - 0.7;
        assert!(filter.matches(&anno));

        anno.occluded_fraction = 1.0 - 0.5;
        assert!(filter.matches(&anno));
    }

    #[test]
    fn occlusion_rejects_too_visible() {
        let filter = OcclusionAreaFilter::new(0.5, 0.7);
        let mut anno = Annotation::new();
        anno.occluded_fraction = 1.0 - 0.8;
        assert!(!filter.matches(&anno));
    }

    #[test]
    fn occlusion_rejects_barely_visible() {
        let filter = OcclusionAreaFilter::new(0.5, 0.7);
        let mut anno = Annotation::new();
        anno.occluded_fraction = 0.9;
        assert!(!filter.matches(&anno));
    }
}
