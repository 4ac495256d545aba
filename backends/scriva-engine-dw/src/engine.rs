// this_file: backends/scriva-engine-dw/src/engine.rs

//! The engine facade: one font, one size, every metric question answered
//!
//! A [`DirectWriteEngine`] is constructed once per font-and-pixel-size
//! combination. Construction acquires shared references to the platform
//! capability objects, derives the font face, and collects global
//! metrics a single time; everything after that is call-and-return
//! queries against those handles.
//!
//! Failure discipline (see `scriva_core::error`): a missing face turns
//! every face-dependent operation into a sentinel-returning no-op, and
//! a failing service call is logged through the `log` facade and folded
//! into the operation's defined failure value. Nothing here panics and
//! nothing propagates an error type to the framework.

use std::sync::Arc;

use scriva_core::fixed::{Fixed, FixedPoint};
use scriva_core::path::GlyphPath;
use scriva_core::traits::{FontService, GdiInterop, PlatformFont, PlatformFontFace};
use scriva_core::types::{
    EngineKind, GlyphIndex, GlyphLayout, GlyphMetrics, GlyphOffset, GlyphRunSpec,
};
use scriva_core::{CmapFlags, EngineSpec};

use crate::outline::PathSink;
use crate::scanner;

/// Glyph-engine adapter over a DirectWrite-shaped platform font service.
pub struct DirectWriteEngine {
    name: String,
    pub(crate) service: Arc<dyn FontService>,
    // Never called through; held so the platform interop object lives
    // exactly as long as the engine.
    _gdi_interop: Arc<dyn GdiInterop>,
    font: Arc<dyn PlatformFont>,
    pub(crate) face: Option<Arc<dyn PlatformFontFace>>,
    pub(crate) spec: EngineSpec,
    // -1 sentinels mean "the font never reported metrics".
    units_per_em: i32,
    line_thickness: Fixed,
    ascent: Fixed,
    descent: Fixed,
    x_height: Fixed,
    line_gap: Fixed,
}

impl DirectWriteEngine {
    pub fn new(
        name: impl Into<String>,
        service: Arc<dyn FontService>,
        gdi_interop: Arc<dyn GdiInterop>,
        font: Arc<dyn PlatformFont>,
        spec: EngineSpec,
    ) -> Self {
        let face = match font.create_face() {
            Ok(face) => Some(face),
            Err(err) => {
                log::warn!("DirectWriteEngine: create_face failed: {err}");
                None
            }
        };

        let mut engine = Self {
            name: name.into(),
            service,
            _gdi_interop: gdi_interop,
            font,
            face,
            spec,
            units_per_em: -1,
            line_thickness: Fixed::from_int(-1),
            ascent: Fixed::from_int(-1),
            descent: Fixed::from_int(-1),
            x_height: Fixed::from_int(-1),
            line_gap: Fixed::from_int(-1),
        };
        engine.collect_metrics();
        engine
    }

    /// One-time global metrics query; values are immutable afterwards.
    fn collect_metrics(&mut self) {
        if self.face.is_none() {
            return;
        }

        let metrics = self.font.metrics();
        if metrics.units_per_em == 0 {
            log::warn!("DirectWriteEngine: font reports zero units per em, metrics left unset");
            return;
        }

        self.units_per_em = metrics.units_per_em as i32;
        self.line_thickness = self.design_to_logical(metrics.underline_thickness);
        self.ascent = self.design_to_logical(metrics.ascent);
        self.descent = self.design_to_logical(metrics.descent);
        self.x_height = self.design_to_logical(metrics.x_height);
        self.line_gap = self.design_to_logical(metrics.line_gap);
    }

    /// Design units to logical pixels: `(design / unitsPerEm) * pixelSize`.
    pub(crate) fn design_to_logical(&self, design: i32) -> Fixed {
        Fixed::from_f32((design as f32 / self.units_per_em as f32) * self.spec.pixel_size)
    }

    /// Integer-metrics mode snaps every reported value to whole pixels.
    fn adjusted(&self, value: Fixed) -> Fixed {
        if self.spec.integer_metrics {
            value.round()
        } else {
            value
        }
    }

    // --- Global metric accessors -----------------------------------------

    pub fn ascent(&self) -> Fixed {
        self.adjusted(self.ascent_or_default())
    }

    /// Reported one logical pixel short of the raw value. The shortfall
    /// keeps adjacent lines from overlapping by exactly one row; every
    /// consumer has grown to depend on it.
    pub fn descent(&self) -> Fixed {
        self.adjusted(self.descent_or_default() - Fixed::ONE)
    }

    pub fn leading(&self) -> Fixed {
        let line_gap = if self.line_gap >= Fixed::ZERO {
            self.line_gap
        } else {
            Fixed::ZERO
        };
        self.adjusted(line_gap)
    }

    pub fn x_height(&self) -> Fixed {
        let x_height = if self.x_height > Fixed::ZERO {
            self.x_height
        } else {
            Fixed::from_f32(self.spec.pixel_size * 0.5)
        };
        self.adjusted(x_height)
    }

    pub fn line_thickness(&self) -> Fixed {
        let thickness = if self.line_thickness > Fixed::ZERO {
            self.line_thickness
        } else {
            fallback_line_thickness(&self.spec)
        };
        self.adjusted(thickness)
    }

    pub fn em_square_size(&self) -> Fixed {
        if self.units_per_em > 0 {
            Fixed::from_int(self.units_per_em)
        } else {
            Fixed::from_f32(self.spec.pixel_size)
        }
    }

    fn ascent_or_default(&self) -> Fixed {
        if self.ascent > Fixed::ZERO {
            self.ascent
        } else {
            Fixed::from_f32(self.spec.pixel_size * 0.8)
        }
    }

    fn descent_or_default(&self) -> Fixed {
        if self.descent > Fixed::ZERO {
            self.descent
        } else {
            Fixed::from_f32(self.spec.pixel_size * 0.2)
        }
    }

    // --- Resolution and advances ------------------------------------------

    /// Resolve UTF-16 code units to glyph indices.
    ///
    /// Surrogate pairs merge into one scalar, so the resulting layout
    /// can be shorter than the input; right-to-left runs get canonical
    /// bidi mirroring first. Unless `indices_only` is set, advances are
    /// recomputed for the resolved glyphs. Returns false (layout
    /// untouched) when the face is absent or the service refuses.
    pub fn string_to_cmap(
        &self,
        units: &[u16],
        flags: CmapFlags,
        layout: &mut GlyphLayout,
    ) -> bool {
        let Some(face) = &self.face else {
            return false;
        };

        let code_points = scanner::decode_code_units(units, flags.rtl);
        match face.glyph_indices(&code_points) {
            Ok(indices) => {
                *layout = GlyphLayout::with_len(indices.len());
                layout.glyphs.copy_from_slice(&indices);
                if !flags.indices_only {
                    self.recalc_advances(layout);
                }
                true
            }
            Err(err) => {
                log::warn!("DirectWriteEngine::string_to_cmap: glyph index query failed: {err}");
                false
            }
        }
    }

    /// Recompute horizontal advances from design-space glyph metrics.
    ///
    /// Silently a no-op without a face; on a failing query the existing
    /// advances stay as they were (callers must not expect them to be
    /// cleared). Vertical advances are always zero in this engine.
    pub fn recalc_advances(&self, layout: &mut GlyphLayout) {
        let Some(face) = &self.face else {
            return;
        };

        match face.design_glyph_metrics(&layout.glyphs) {
            Ok(metrics) => {
                for (i, glyph_metrics) in metrics.iter().enumerate().take(layout.len()) {
                    let mut advance = self.design_to_logical(glyph_metrics.advance_width);
                    if self.spec.integer_metrics {
                        advance = advance.round();
                    }
                    layout.advances_x[i] = advance;
                    layout.advances_y[i] = Fixed::ZERO;
                }
            }
            Err(err) => {
                log::warn!(
                    "DirectWriteEngine::recalc_advances: design metrics query failed: {err}"
                );
            }
        }
    }

    // --- Bounding boxes ---------------------------------------------------

    /// Bounding box of a whole run with precomputed advances.
    pub fn bounding_box_run(&self, layout: &GlyphLayout) -> GlyphMetrics {
        if layout.is_empty() {
            return GlyphMetrics::default();
        }

        let round = self.spec.integer_metrics;
        let mut total = Fixed::ZERO;
        for i in 0..layout.len() {
            let advance = layout.effective_advance(i);
            total += if round { advance.round() } else { advance };
        }

        let ascent = self.ascent_or_default();
        let descent = self.descent_or_default();
        GlyphMetrics {
            x: Fixed::ZERO,
            y: -ascent,
            width: total - self.last_right_bearing(layout),
            height: ascent + descent,
            x_advance: total,
            y_advance: Fixed::ZERO,
        }
    }

    /// Bounding box of a single glyph from design-space metrics.
    ///
    /// Returns an all-zero box when the face is absent or the query
    /// fails; a glyph whose metrics are genuinely all zero produces the
    /// same box.
    pub fn bounding_box_glyph(&self, glyph: GlyphIndex) -> GlyphMetrics {
        let Some(face) = &self.face else {
            return GlyphMetrics::default();
        };

        let metrics = match face.design_glyph_metrics(&[glyph]) {
            Ok(metrics) if !metrics.is_empty() => metrics[0],
            Ok(_) => return GlyphMetrics::default(),
            Err(err) => {
                log::warn!(
                    "DirectWriteEngine::bounding_box_glyph: design metrics query failed: {err}"
                );
                return GlyphMetrics::default();
            }
        };

        let mut advance_width = self.design_to_logical(metrics.advance_width);
        let left_side_bearing = self.design_to_logical(metrics.left_side_bearing);
        let right_side_bearing = self.design_to_logical(metrics.right_side_bearing);
        let mut advance_height = self.design_to_logical(metrics.advance_height);
        let vertical_origin_y = self.design_to_logical(metrics.vertical_origin_y);

        if self.spec.integer_metrics {
            advance_width = advance_width.round();
            advance_height = advance_height.round();
        }

        let width = advance_width - left_side_bearing - right_side_bearing;
        GlyphMetrics {
            x: -left_side_bearing,
            y: -vertical_origin_y,
            width,
            height: self.ascent_or_default() + self.descent_or_default(),
            x_advance: advance_width,
            y_advance: advance_height,
        }
    }

    /// Right-side bearing of the run's trailing glyph, logical pixels.
    fn last_right_bearing(&self, layout: &GlyphLayout) -> Fixed {
        let Some(&glyph) = layout.glyphs.last() else {
            return Fixed::ZERO;
        };
        let Some(face) = &self.face else {
            return Fixed::ZERO;
        };
        match face.design_glyph_metrics(&[glyph]) {
            Ok(metrics) if !metrics.is_empty() => {
                self.design_to_logical(metrics[0].right_side_bearing)
            }
            _ => Fixed::ZERO,
        }
    }

    // --- Outlines ---------------------------------------------------------

    /// Decompose glyphs at fixed positions into `path`.
    ///
    /// Positions are logical-pixel pen positions with y growing
    /// downward; the outline protocol wants ascender offsets, so y is
    /// negated. Advances are forced to zero—placement travels entirely
    /// through the offsets. A failed decomposition is logged and leaves
    /// the path at whatever point the sink had reached.
    pub fn add_glyphs_to_path(
        &self,
        glyphs: &[GlyphIndex],
        positions: &[FixedPoint],
        path: &mut GlyphPath,
        rtl: bool,
    ) {
        let Some(face) = &self.face else {
            return;
        };

        let run = GlyphRunSpec {
            em_size: self.spec.pixel_size,
            glyphs: glyphs.to_vec(),
            advances: vec![0.0; glyphs.len()],
            offsets: positions
                .iter()
                .map(|p| GlyphOffset {
                    advance_offset: p.x.to_f32(),
                    ascender_offset: -p.y.to_f32(),
                })
                .collect(),
            rtl,
        };

        let mut sink = PathSink::new(path);
        if let Err(err) = face.glyph_run_outline(self.spec.pixel_size, &run, rtl, &mut sink) {
            log::warn!(
                "DirectWriteEngine::add_glyphs_to_path: outline decomposition failed: {err}"
            );
        }
    }

    // --- Character coverage -----------------------------------------------

    /// True only when the font carries every code point in the string.
    /// Stops at the first missing code point or the first failed query;
    /// a failure counts as "cannot render", not as an error.
    pub fn can_render(&self, units: &[u16]) -> bool {
        let mut i = 0;
        while i < units.len() {
            let code_point = scanner::next_code_point(units, &mut i);
            match self.font.has_character(code_point) {
                Ok(true) => {}
                Ok(false) => return false,
                Err(err) => {
                    log::warn!(
                        "DirectWriteEngine::can_render: character query failed: {err}"
                    );
                    return false;
                }
            }
        }
        true
    }

    // --- Font tables ------------------------------------------------------

    /// Existence-and-length query: the table's true size without
    /// fetching its bytes.
    pub fn sfnt_table_len(&self, tag: u32) -> Option<usize> {
        self.fetch_table(tag).map(|table| table.len())
    }

    /// Full fetch of a font table's bytes by its natural big-endian tag.
    pub fn sfnt_table_data(&self, tag: u32) -> Option<Vec<u8>> {
        self.fetch_table(tag)
    }

    fn fetch_table(&self, tag: u32) -> Option<Vec<u8>> {
        let face = self.face.as_ref()?;
        // The platform expects the tag byte-reversed from its natural
        // big-endian form.
        match face.font_table(tag.swap_bytes()) {
            Ok(table) => table,
            Err(err) => {
                log::warn!("DirectWriteEngine::fetch_table: font table query failed: {err}");
                None
            }
        }
    }

    // --- Identity ---------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine_kind(&self) -> EngineKind {
        EngineKind::PlatformNative
    }

    pub fn supports_sub_pixel_positions(&self) -> bool {
        true
    }

    /// Widest character advance. Not provided by the platform path this
    /// engine uses; reported as zero.
    pub fn max_char_width(&self) -> f32 {
        0.0
    }

    pub fn pixel_size(&self) -> f32 {
        self.spec.pixel_size
    }

    /// Whether the face-level capability resolved at construction.
    pub fn has_face(&self) -> bool {
        self.face.is_some()
    }
}

/// The framework's ad hoc default when a font reports no underline
/// thickness: scale with weight and size, never thinner than a pixel.
fn fallback_line_thickness(spec: &EngineSpec) -> Fixed {
    let score = spec.weight as i32 * spec.pixel_size as i32;
    let mut lw = score / 700;
    if lw < 2 && score >= 1050 {
        lw = 2;
    }
    if lw == 0 {
        lw = 1;
    }
    Fixed::from_int(lw)
}

/// A font-table tag in its natural big-endian form, e.g.
/// `sfnt_tag(b"cmap")`.
pub const fn sfnt_tag(tag: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sfnt_tag_is_big_endian() {
        assert_eq!(sfnt_tag(b"cmap"), 0x636D6170);
        assert_eq!(sfnt_tag(b"cmap").swap_bytes(), 0x70616D63);
    }

    #[test]
    fn fallback_thickness_never_zero() {
        let thin = EngineSpec {
            pixel_size: 1.0,
            weight: 1,
            integer_metrics: false,
        };
        assert_eq!(fallback_line_thickness(&thin), Fixed::from_int(1));

        let heavy = EngineSpec {
            pixel_size: 24.0,
            weight: 75,
            integer_metrics: false,
        };
        assert!(fallback_line_thickness(&heavy) >= Fixed::from_int(2));
    }
}
