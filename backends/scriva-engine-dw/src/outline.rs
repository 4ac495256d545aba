// this_file: backends/scriva-engine-dw/src/outline.rs

//! The sink the platform drives: outline events become a portable path
//!
//! Outline decomposition is a callback protocol—the font service calls
//! begin-figure, lines, cubics, end-figure in an order it alone
//! controls. [`PathSink`] is the receiving end: it holds a borrowed
//! [`GlyphPath`] and translates each event straight into path segments,
//! so when the service returns, the caller's path is the outline.

use kurbo::Point;
use scriva_core::error::{ServiceError, ServiceResult};
use scriva_core::path::{FillRule, GlyphPath};
use scriva_core::traits::OutlineSink;
use scriva_core::types::{BezierSegment, FillMode, OutlinePoint};

/// Builds a [`GlyphPath`] from the platform outline protocol.
pub struct PathSink<'a> {
    path: &'a mut GlyphPath,
    start_point: Point,
}

impl<'a> PathSink<'a> {
    pub fn new(path: &'a mut GlyphPath) -> Self {
        Self {
            path,
            start_point: Point::ZERO,
        }
    }

    fn to_point(p: OutlinePoint) -> Point {
        Point::new(p.x as f64, p.y as f64)
    }
}

impl OutlineSink for PathSink<'_> {
    fn begin_figure(&mut self, start: OutlinePoint) {
        self.start_point = Self::to_point(start);
        self.path.move_to(self.start_point);
    }

    fn add_lines(&mut self, points: &[OutlinePoint]) {
        for &p in points {
            self.path.line_to(Self::to_point(p));
        }
    }

    fn add_beziers(&mut self, segments: &[BezierSegment]) {
        for seg in segments {
            self.path.curve_to(
                Self::to_point(seg.c1),
                Self::to_point(seg.c2),
                Self::to_point(seg.end),
            );
        }
    }

    fn end_figure(&mut self, closed: bool) {
        if closed {
            self.path.close();
        }
    }

    fn set_fill_mode(&mut self, mode: FillMode) {
        self.path.set_fill_rule(match mode {
            FillMode::Alternate => FillRule::EvenOdd,
            FillMode::Winding => FillRule::NonZero,
        });
    }

    fn close(&mut self) -> ServiceResult<()> {
        Err(ServiceError::NotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> OutlinePoint {
        OutlinePoint { x, y }
    }

    #[test]
    fn protocol_builds_a_closed_figure() {
        let mut path = GlyphPath::new();
        {
            let mut sink = PathSink::new(&mut path);
            sink.begin_figure(p(0.0, 0.0));
            sink.add_lines(&[p(8.0, 0.0), p(8.0, 8.0), p(0.0, 8.0)]);
            sink.end_figure(true);
        }
        assert!(!path.is_empty());
        let bounds = path.bounding_box();
        assert_eq!((bounds.width(), bounds.height()), (8.0, 8.0));
    }

    #[test]
    fn open_figure_stays_open() {
        let mut path = GlyphPath::new();
        {
            let mut sink = PathSink::new(&mut path);
            sink.begin_figure(p(0.0, 0.0));
            sink.add_lines(&[p(4.0, 4.0)]);
            sink.end_figure(false);
        }
        // A polyline, no closing segment.
        assert_eq!(path.elements().elements().len(), 2);
    }

    #[test]
    fn beziers_become_cubic_segments() {
        let mut path = GlyphPath::new();
        {
            let mut sink = PathSink::new(&mut path);
            sink.begin_figure(p(0.0, 0.0));
            sink.add_beziers(&[BezierSegment {
                c1: p(1.0, 2.0),
                c2: p(3.0, 2.0),
                end: p(4.0, 0.0),
            }]);
            sink.end_figure(true);
        }
        let has_cubic = path
            .elements()
            .elements()
            .iter()
            .any(|el| matches!(el, kurbo::PathEl::CurveTo(..)));
        assert!(has_cubic);
    }

    #[test]
    fn fill_modes_translate() {
        let mut path = GlyphPath::new();
        {
            let mut sink = PathSink::new(&mut path);
            sink.set_fill_mode(FillMode::Alternate);
        }
        assert_eq!(path.fill_rule(), FillRule::EvenOdd);

        let mut path = GlyphPath::new();
        {
            let mut sink = PathSink::new(&mut path);
            sink.set_fill_mode(FillMode::Winding);
        }
        assert_eq!(path.fill_rule(), FillRule::NonZero);
    }

    #[test]
    fn close_reports_not_implemented() {
        let mut path = GlyphPath::new();
        let mut sink = PathSink::new(&mut path);
        assert!(matches!(sink.close(), Err(ServiceError::NotImplemented)));
    }
}
