// this_file: crates/scriva-core/src/path.rs

//! The portable outline: where vendor curves become a path anyone can render
//!
//! A [`GlyphPath`] is what outline extraction hands downstream renderers:
//! a plain sequence of move/line/cubic segments plus a fill rule, carried
//! on a [`kurbo::BezPath`] so bounding boxes, stroking, and hit-testing
//! come for free.

use kurbo::{BezPath, Point, Rect, Shape};

/// How enclosed regions of the path are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Non-zero winding number fills (the font default).
    #[default]
    NonZero,
    /// Alternating (even-odd) fills.
    EvenOdd,
}

/// A glyph outline in logical pixels, built incrementally and handed to
/// the caller when extraction finishes.
#[derive(Debug, Clone, Default)]
pub struct GlyphPath {
    elements: BezPath,
    fill_rule: FillRule,
}

impl GlyphPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new subpath at `p`.
    pub fn move_to(&mut self, p: Point) {
        self.elements.move_to(p);
    }

    pub fn line_to(&mut self, p: Point) {
        self.elements.line_to(p);
    }

    /// Append a cubic Bezier segment (two control points, one endpoint).
    pub fn curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.elements.curve_to(c1, c2, end);
    }

    /// Close the current subpath back to its starting point.
    pub fn close(&mut self) {
        self.elements.close_path();
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        self.fill_rule = rule;
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// The raw segment sequence.
    pub fn elements(&self) -> &BezPath {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.elements().is_empty()
    }

    /// Tight axis-aligned bounds of the outline ink.
    pub fn bounding_box(&self) -> Rect {
        self.elements.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fill_rule_is_non_zero() {
        let path = GlyphPath::new();
        assert_eq!(path.fill_rule(), FillRule::NonZero);
        assert!(path.is_empty());
    }

    #[test]
    fn builds_a_closed_square() {
        let mut path = GlyphPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(4.0, 0.0));
        path.line_to(Point::new(4.0, 4.0));
        path.line_to(Point::new(0.0, 4.0));
        path.close();

        assert!(!path.is_empty());
        let bounds = path.bounding_box();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 4.0, 4.0));
    }

    #[test]
    fn fill_rule_sticks() {
        let mut path = GlyphPath::new();
        path.set_fill_rule(FillRule::EvenOdd);
        assert_eq!(path.fill_rule(), FillRule::EvenOdd);
    }
}
