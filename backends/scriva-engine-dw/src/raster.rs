// this_file: backends/scriva-engine-dw/src/raster.rs

//! Where one glyph becomes coverage pixels
//!
//! Rasterization goes through the platform's analysis object: build a
//! single-glyph run, fold the sub-pixel position and margin into the
//! analysis transform, ask for a ClearType texture over the full
//! bitmap rectangle, and repack the three coverage bytes per pixel
//! into a 32-bit RGB image. The alpha-map variant then collapses the
//! triple channel to an 8-bit mask through a gamma-corrected lookup
//! table shared by every engine instance in the process.
//!
//! Any failure along the way yields the empty bitmap—"no pixels, zero
//! size"—after a log entry. Nothing is raised.

use std::sync::OnceLock;

use kurbo::{Affine, Point, Rect};
use scriva_core::bitmap::{CoverageBitmap, CoverageData};
use scriva_core::fixed::Fixed;
use scriva_core::types::{
    GlyphIndex, GlyphMetrics, GlyphOffset, GlyphRunSpec, MeasuringMode, RenderTransform,
    RenderingMode, TextureBounds,
};

use crate::engine::DirectWriteEngine;

/// Gamma exponent of the process-wide coverage-to-alpha curve.
const SMOOTHING_GAMMA: f32 = 1.7;

/// Extra pixels beyond metrics and margin; absorbs anti-aliasing and
/// hinting spread past the reported ink box.
const RASTER_SLACK: i32 = 4;

static GAMMA_TABLE: OnceLock<[u32; 256]> = OnceLock::new();

/// The 256-entry gamma table, built once and read-only thereafter:
/// `table[i] = (i/255)^gamma * 2047`.
fn gamma_table() -> &'static [u32; 256] {
    GAMMA_TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = ((i as f32 / 255.0).powf(SMOOTHING_GAMMA) * 2047.0) as u32;
        }
        table
    })
}

/// Luminance weighting used when the RGB coverage collapses to gray.
fn gray(r: u32, g: u32, b: u32) -> u32 {
    (r * 11 + g * 16 + b * 5) / 32
}

impl DirectWriteEngine {
    /// Rasterize one glyph into a 32-bit RGB coverage image.
    ///
    /// `sub_pixel` shifts the glyph origin horizontally within the
    /// pixel; `margin` pads every edge; `xform` is applied around the
    /// glyph origin. The empty bitmap is the failure value and means
    /// "no pixels", not "error".
    pub fn image_for_glyph(
        &self,
        glyph: GlyphIndex,
        sub_pixel: Fixed,
        margin: i32,
        xform: Affine,
    ) -> CoverageBitmap {
        let Some(face) = self.face.clone() else {
            return CoverageBitmap::empty();
        };

        let metrics = self.transformed_bounding_box(glyph, xform);
        let slack = Fixed::from_int(margin * 2 + RASTER_SLACK);
        let width = (metrics.width + slack).ceil().to_int();
        let height = (metrics.height + slack).ceil().to_int();
        if width <= 0 || height <= 0 {
            return CoverageBitmap::empty();
        }

        let run = GlyphRunSpec {
            em_size: self.spec.pixel_size,
            glyphs: vec![glyph],
            // Placement travels through the transform, not the run.
            advances: vec![0.0],
            offsets: vec![GlyphOffset::default()],
            rtl: false,
        };

        let x = Fixed::from_int(margin) - metrics.x.round() + sub_pixel;
        let y = Fixed::from_int(margin) - metrics.y.floor();

        let [m11, m12, m21, m22, _, _] = xform.as_coeffs();
        let transform = RenderTransform {
            m11: m11 as f32,
            m12: m12 as f32,
            m21: m21 as f32,
            m22: m22 as f32,
            dx: x.to_f32(),
            dy: y.to_f32(),
        };

        let analysis = match self.service.create_glyph_run_analysis(
            &face,
            &run,
            1.0,
            &transform,
            RenderingMode::ClearTypeNaturalSymmetric,
            MeasuringMode::Natural,
        ) {
            Ok(analysis) => analysis,
            Err(err) => {
                log::warn!("DirectWriteEngine::image_for_glyph: analysis creation failed: {err}");
                return CoverageBitmap::empty();
            }
        };

        let bounds = TextureBounds {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        };
        let coverage = match analysis.alpha_texture(bounds) {
            Ok(coverage) => coverage,
            Err(err) => {
                log::warn!("DirectWriteEngine::image_for_glyph: alpha texture failed: {err}");
                return CoverageBitmap::empty();
            }
        };

        let (w, h) = (width as usize, height as usize);
        if coverage.len() < w * h * 3 {
            log::warn!(
                "DirectWriteEngine::image_for_glyph: short coverage buffer ({} < {})",
                coverage.len(),
                w * h * 3
            );
            return CoverageBitmap::empty();
        }

        // Opaque white background, then three coverage bytes per pixel
        // packed as 0x00RRGGBB.
        let mut pixels = vec![0xffff_ffffu32; w * h];
        for row in 0..h {
            let src_row = &coverage[row * w * 3..(row + 1) * w * 3];
            let dst_row = &mut pixels[row * w..(row + 1) * w];
            for (dst, src) in dst_row.iter_mut().zip(src_row.chunks_exact(3)) {
                *dst = (src[0] as u32) << 16 | (src[1] as u32) << 8 | (src[2] as u32);
            }
        }

        CoverageBitmap::rgb32(width as u32, height as u32, pixels)
    }

    /// An 8-bit alpha mask for plain grayscale compositing, derived
    /// from the RGB coverage image through the process gamma table.
    pub fn alpha_map_for_glyph(&self, glyph: GlyphIndex, sub_pixel: Fixed) -> CoverageBitmap {
        let image = self.image_for_glyph(glyph, sub_pixel, 0, Affine::IDENTITY);
        if image.is_empty() {
            return CoverageBitmap::empty();
        }

        let table = gamma_table();
        let (width, height) = (image.width(), image.height());
        let alpha = match image.data() {
            CoverageData::Rgb32(pixels) => pixels
                .iter()
                .map(|&px| {
                    // Invert, collapse to gray, gamma-correct, invert
                    // back: full coverage lands on alpha 255.
                    let r = 255 - ((px >> 16) & 0xff);
                    let g = 255 - ((px >> 8) & 0xff);
                    let b = 255 - (px & 0xff);
                    (255 - table[gray(r, g, b) as usize] * 255 / 2047) as u8
                })
                .collect(),
            CoverageData::Alpha8(mask) => mask.clone(),
        };

        CoverageBitmap::alpha8(width, height, alpha)
    }

    /// The 32-bit RGB coverage image verbatim, format-converted when a
    /// non-RGB image somehow arrives.
    pub fn alpha_rgb_map_for_glyph(
        &self,
        glyph: GlyphIndex,
        sub_pixel: Fixed,
        margin: i32,
        xform: Affine,
    ) -> CoverageBitmap {
        self.image_for_glyph(glyph, sub_pixel, margin, xform).into_rgb32()
    }

    /// Single-glyph bounding box with the caller's transform applied.
    /// A pure translation leaves the metric box untouched.
    fn transformed_bounding_box(&self, glyph: GlyphIndex, xform: Affine) -> GlyphMetrics {
        let metrics = self.bounding_box_glyph(glyph);
        let [m11, m12, m21, m22, _, _] = xform.as_coeffs();
        if (m11, m12, m21, m22) == (1.0, 0.0, 0.0, 1.0) {
            return metrics;
        }

        let rect = Rect::new(
            metrics.x.to_f64(),
            metrics.y.to_f64(),
            (metrics.x + metrics.width).to_f64(),
            (metrics.y + metrics.height).to_f64(),
        );
        let mapped = xform.transform_rect_bbox(rect);
        let advance = xform
            * Point::new(metrics.x_advance.to_f64(), metrics.y_advance.to_f64());

        GlyphMetrics {
            x: Fixed::from_f32(mapped.x0 as f32),
            y: Fixed::from_f32(mapped.y0 as f32),
            width: Fixed::from_f32(mapped.width() as f32),
            height: Fixed::from_f32(mapped.height() as f32),
            x_advance: Fixed::from_f32(advance.x as f32),
            y_advance: Fixed::from_f32(advance.y as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_table_shape() {
        let table = gamma_table();
        assert_eq!(table[0], 0);
        assert_eq!(table[255], 2047);
        // Monotonic: more coverage never maps to less.
        assert!(table.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn gamma_endpoints_round_trip_to_alpha() {
        let table = gamma_table();
        // Full ink: gray 255 -> alpha 0 after inversion arithmetic.
        assert_eq!(255 - table[255] * 255 / 2047, 0);
        // No ink: gray 0 -> alpha 255.
        assert_eq!(255 - table[0] * 255 / 2047, 255);
    }

    #[test]
    fn gray_weights_sum_to_unity() {
        assert_eq!(gray(255, 255, 255), 255);
        assert_eq!(gray(0, 0, 0), 0);
    }
}
