// this_file: crates/scriva-core/src/lib.rs

//! Scriva Core: the shared vocabulary of platform glyph engines
//!
//! A glyph engine answers four questions about text the surrounding
//! framework already shaped: which glyph is this code point, how far
//! does it advance, how big is its ink, and what do its pixels or
//! curves look like. This crate holds everything those answers are
//! made of—the 26.6 fixed-point unit, the portable outline path, the
//! coverage bitmap, the metric structs—plus the capability traits an
//! engine uses to talk to the platform's font service.
//!
//! The engines themselves live in `backends/`; they depend on this
//! crate and nothing in this crate depends on them.
//!
//! ## The flow
//!
//! 1. Code units become Unicode scalars (surrogate pairs merge)
//! 2. Scalars become glyph indices via [`traits::PlatformFontFace`]
//! 3. Glyph indices become geometry in [`fixed::Fixed`] logical pixels
//! 4. Geometry becomes a [`bitmap::CoverageBitmap`] or a [`path::GlyphPath`]
//!
//! Failures at the service boundary are [`error::ServiceError`]s; they
//! are logged and folded into sentinel return values before they reach
//! the framework, never raised across it.

pub mod bitmap;
pub mod error;
pub mod fixed;
pub mod path;
pub mod traits;

pub use bitmap::{CoverageBitmap, CoverageData};
pub use error::{ServiceError, ServiceResult};
pub use fixed::{Fixed, FixedPoint};
pub use path::{FillRule, GlyphPath};

/// The data structures engines and services exchange
pub mod types {
    use crate::fixed::{Fixed, FixedPoint};

    /// A glyph identifier, scoped to one font face. Indices from
    /// different faces are unrelated numbers.
    pub type GlyphIndex = u16;

    /// Global font metrics in design units, as reported by the
    /// platform font object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FontMetrics {
        /// Design units spanning one em. Scales every other field.
        pub units_per_em: u16,
        pub ascent: i32,
        pub descent: i32,
        pub x_height: i32,
        pub line_gap: i32,
        pub underline_thickness: i32,
    }

    /// Per-glyph metrics in design units.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct DesignGlyphMetrics {
        pub advance_width: i32,
        pub advance_height: i32,
        pub left_side_bearing: i32,
        pub right_side_bearing: i32,
        pub vertical_origin_y: i32,
    }

    /// A glyph bounding box in logical pixels: ink origin and extent
    /// plus the pen advance past the glyph.
    ///
    /// An all-zero box doubles as the "metrics unavailable" sentinel;
    /// a glyph whose metrics are legitimately all zero (a degenerate
    /// space) is indistinguishable from a failed query by design.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct GlyphMetrics {
        pub x: Fixed,
        pub y: Fixed,
        pub width: Fixed,
        pub height: Fixed,
        pub x_advance: Fixed,
        pub y_advance: Fixed,
    }

    impl GlyphMetrics {
        pub fn is_zero(&self) -> bool {
            *self == GlyphMetrics::default()
        }
    }

    /// Glyph indices with their advances and positioning offsets, the
    /// unit of work for resolution and advance recomputation.
    ///
    /// The three vectors stay the same length; `advances_y` is always
    /// zero in this horizontal-only engine but kept explicit so the
    /// layout round-trips through the framework unchanged.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct GlyphLayout {
        pub glyphs: Vec<GlyphIndex>,
        pub advances_x: Vec<Fixed>,
        pub advances_y: Vec<Fixed>,
        pub offsets: Vec<FixedPoint>,
    }

    impl GlyphLayout {
        pub fn with_len(len: usize) -> Self {
            Self {
                glyphs: vec![0; len],
                advances_x: vec![Fixed::ZERO; len],
                advances_y: vec![Fixed::ZERO; len],
                offsets: vec![FixedPoint::default(); len],
            }
        }

        pub fn len(&self) -> usize {
            self.glyphs.len()
        }

        pub fn is_empty(&self) -> bool {
            self.glyphs.is_empty()
        }

        /// The advance the pen actually travels for glyph `i`: the
        /// computed advance plus any justification offset applied by
        /// the framework.
        pub fn effective_advance(&self, i: usize) -> Fixed {
            self.advances_x[i] + self.offsets[i].x
        }
    }

    /// Placement offset of one glyph within a run, in logical pixels
    /// along the baseline (`advance_offset`) and above it
    /// (`ascender_offset`).
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct GlyphOffset {
        pub advance_offset: f32,
        pub ascender_offset: f32,
    }

    /// A glyph run as the platform service consumes it: one em size,
    /// one direction, parallel per-glyph arrays.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct GlyphRunSpec {
        pub em_size: f32,
        pub glyphs: Vec<GlyphIndex>,
        pub advances: Vec<f32>,
        pub offsets: Vec<GlyphOffset>,
        pub rtl: bool,
    }

    /// A 2D affine transform in the platform's row-vector convention.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct RenderTransform {
        pub m11: f32,
        pub m12: f32,
        pub m21: f32,
        pub m22: f32,
        pub dx: f32,
        pub dy: f32,
    }

    impl RenderTransform {
        pub const IDENTITY: RenderTransform = RenderTransform {
            m11: 1.0,
            m12: 0.0,
            m21: 0.0,
            m22: 1.0,
            dx: 0.0,
            dy: 0.0,
        };
    }

    impl From<kurbo::Affine> for RenderTransform {
        fn from(affine: kurbo::Affine) -> Self {
            let [m11, m12, m21, m22, dx, dy] = affine.as_coeffs();
            Self {
                m11: m11 as f32,
                m12: m12 as f32,
                m21: m21 as f32,
                m22: m22 as f32,
                dx: dx as f32,
                dy: dy as f32,
            }
        }
    }

    /// Anti-aliasing strategy requested from the rasterization service.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RenderingMode {
        /// Binary coverage, no anti-aliasing.
        Aliased,
        /// Sub-pixel ClearType, asymmetric filtering.
        ClearTypeNatural,
        /// Sub-pixel ClearType, symmetric filtering (what this engine
        /// always requests).
        ClearTypeNaturalSymmetric,
    }

    /// How glyph advances are measured during analysis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MeasuringMode {
        /// Ideal resolution-independent metrics.
        Natural,
        /// Legacy grid-fitted metrics.
        GdiClassic,
    }

    /// Integer pixel rectangle a coverage texture is requested over;
    /// half-open on the right and bottom.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct TextureBounds {
        pub left: i32,
        pub top: i32,
        pub right: i32,
        pub bottom: i32,
    }

    impl TextureBounds {
        pub fn width(&self) -> i32 {
            self.right - self.left
        }

        pub fn height(&self) -> i32 {
            self.bottom - self.top
        }
    }

    /// A point delivered by the outline protocol, in logical pixels.
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct OutlinePoint {
        pub x: f32,
        pub y: f32,
    }

    /// One cubic Bezier segment of the outline protocol.
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct BezierSegment {
        pub c1: OutlinePoint,
        pub c2: OutlinePoint,
        pub end: OutlinePoint,
    }

    /// Fill mode as the outline protocol announces it. [`crate::path::FillRule`]
    /// is the portable equivalent the sink translates into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FillMode {
        /// Alternating fill, maps to even-odd.
        Alternate,
        /// Winding fill, maps to non-zero.
        Winding,
    }

    /// Which engine variant answered. The framework branches on this
    /// when a capability only exists on some platforms.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum EngineKind {
        /// The platform-native rasterization service.
        PlatformNative,
    }
}

/// How an engine instance is configured at construction.
///
/// An engine is not resizable: a different pixel size means a new
/// engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSpec {
    /// Target rendering size in logical pixels per em.
    pub pixel_size: f32,
    /// Weight on the 0–99 scale (50 = normal); only feeds the fallback
    /// line-thickness heuristic when the font reports no metrics.
    pub weight: u16,
    /// Force every reported metric onto the whole-pixel grid.
    pub integer_metrics: bool,
}

impl Default for EngineSpec {
    fn default() -> Self {
        Self {
            pixel_size: 16.0,
            weight: 50,
            integer_metrics: false,
        }
    }
}

/// Flags steering code-point to glyph-index resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CmapFlags {
    /// The run is right-to-left: apply canonical bidi mirroring before
    /// resolution.
    pub rtl: bool,
    /// Resolve indices only; skip the advance recomputation pass.
    pub indices_only: bool,
}
