//! The contracts that bind an engine to its platform font service
//!
//! The platform's font machinery—face creation, glyph lookup, design
//! metrics, outline decomposition, coverage analysis—is an opaque
//! capability provider behind these traits. An engine holds them as
//! `Arc<dyn _>`: ownership is shared with whoever else the platform
//! handed references to, and the last holder to drop releases the
//! underlying resource. No reference counting is ever exposed.
//!
//! ## The Players
//!
//! - [`PlatformFont`] - A selected font + style, the root capability
//! - [`PlatformFontFace`] - Face-level queries: glyphs, metrics, tables, outlines
//! - [`FontService`] - The factory that turns glyph runs into coverage analyses
//! - [`GlyphRunAnalysis`] - One rasterization in flight
//! - [`GdiInterop`] - Opaque interop handle kept alive for the engine's lifetime
//! - [`OutlineSink`] - The callback protocol outline decomposition drives

use std::sync::Arc;

use crate::error::ServiceResult;
use crate::types::{
    BezierSegment, DesignGlyphMetrics, FillMode, FontMetrics, GlyphIndex, GlyphRunSpec,
    MeasuringMode, OutlinePoint, RenderTransform, RenderingMode, TextureBounds,
};

/// A selected font and style as the platform sees it.
pub trait PlatformFont: Send + Sync {
    /// Derive the face-level capability. One call per engine instance;
    /// failure leaves the engine in feature-unavailable mode.
    fn create_face(&self) -> ServiceResult<Arc<dyn PlatformFontFace>>;

    /// Global design-space metrics. Infallible on every known platform;
    /// the values still get sanity-checked by the collector.
    fn metrics(&self) -> FontMetrics;

    /// Whether this font carries a glyph for the Unicode scalar.
    fn has_character(&self, code_point: u32) -> ServiceResult<bool>;
}

/// Face-level queries: everything keyed by glyph index lives here.
pub trait PlatformFontFace: Send + Sync {
    /// Batch code-point to glyph-index resolution.
    fn glyph_indices(&self, code_points: &[u32]) -> ServiceResult<Vec<GlyphIndex>>;

    /// Batch design-space metrics for glyph indices.
    fn design_glyph_metrics(
        &self,
        glyphs: &[GlyphIndex],
    ) -> ServiceResult<Vec<DesignGlyphMetrics>>;

    /// Raw font-table bytes by tag, or `None` when the table does not
    /// exist. The tag arrives in the platform's expected byte order
    /// (reversed from the natural big-endian tag; callers do the swap).
    fn font_table(&self, tag: u32) -> ServiceResult<Option<Vec<u8>>>;

    /// Decompose a glyph run into outline events, delivered to `sink`
    /// in the order the platform dictates.
    fn glyph_run_outline(
        &self,
        em_size: f32,
        run: &GlyphRunSpec,
        rtl: bool,
        sink: &mut dyn OutlineSink,
    ) -> ServiceResult<()>;
}

/// The factory capability: turns a glyph run plus transform into a
/// rasterization analysis.
pub trait FontService: Send + Sync {
    fn create_glyph_run_analysis(
        &self,
        face: &Arc<dyn PlatformFontFace>,
        run: &GlyphRunSpec,
        scale: f32,
        transform: &RenderTransform,
        rendering: RenderingMode,
        measuring: MeasuringMode,
    ) -> ServiceResult<Box<dyn GlyphRunAnalysis>>;
}

/// One glyph-run rasterization, ready to emit coverage textures.
pub trait GlyphRunAnalysis {
    /// Three bytes of ClearType coverage per pixel, row-major over
    /// `bounds`, length `width * height * 3`.
    fn alpha_texture(&self, bounds: TextureBounds) -> ServiceResult<Vec<u8>>;
}

/// Opaque GDI-interop capability. The engine never calls through it;
/// holding the reference keeps the platform object alive alongside the
/// font and factory for the engine's lifetime.
pub trait GdiInterop: Send + Sync {}

/// The outline-collection protocol driven by
/// [`PlatformFontFace::glyph_run_outline`].
///
/// Call order belongs to the platform, not the implementor: figures
/// open with [`begin_figure`](OutlineSink::begin_figure), accumulate
/// lines and cubics, and close with
/// [`end_figure`](OutlineSink::end_figure); the fill mode may arrive at
/// any point.
pub trait OutlineSink {
    /// Start a new figure (subpath) at `start`.
    fn begin_figure(&mut self, start: OutlinePoint);

    /// Append straight segments to the open figure.
    fn add_lines(&mut self, points: &[OutlinePoint]);

    /// Append cubic Bezier segments to the open figure.
    fn add_beziers(&mut self, segments: &[BezierSegment]);

    /// Finish the open figure, closing it back to its start when asked.
    fn end_figure(&mut self, closed: bool);

    /// Set the fill rule for the whole outline.
    fn set_fill_mode(&mut self, mode: FillMode);

    /// Final handshake of the platform protocol. Not used in this
    /// engine's flow; implementations report `NotImplemented`.
    fn close(&mut self) -> ServiceResult<()>;
}
