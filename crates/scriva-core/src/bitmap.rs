//! Coverage bitmaps: what a rasterized glyph looks like before blending
//!
//! Two payloads cover every consumer: an 8-bit alpha mask for plain
//! anti-aliasing, and a 32-bit RGB triple-channel coverage image for
//! ClearType-style sub-pixel rendering. An empty bitmap is a defined
//! result ("no pixels, zero size"), not an error.

/// Pixel payload of a [`CoverageBitmap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageData {
    /// One byte per pixel, 0 = transparent, 255 = full coverage.
    Alpha8(Vec<u8>),
    /// One `0x00RRGGBB` word per pixel, each channel an independent
    /// sub-pixel coverage amount.
    Rgb32(Vec<u32>),
}

/// A freshly rasterized glyph, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageBitmap {
    width: u32,
    height: u32,
    data: CoverageData,
}

impl CoverageBitmap {
    /// The failure sentinel: zero size, no pixels.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: CoverageData::Rgb32(Vec::new()),
        }
    }

    pub fn alpha8(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height) as usize);
        Self {
            width,
            height,
            data: CoverageData::Alpha8(data),
        }
    }

    pub fn rgb32(width: u32, height: u32, data: Vec<u32>) -> Self {
        debug_assert_eq!(data.len(), (width * height) as usize);
        Self {
            width,
            height,
            data: CoverageData::Rgb32(data),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &CoverageData {
        &self.data
    }

    /// The image as 32-bit RGB coverage, converting an alpha mask to a
    /// gray triple when needed. Already-RGB images pass through as-is.
    pub fn into_rgb32(self) -> Self {
        match self.data {
            CoverageData::Rgb32(_) => self,
            CoverageData::Alpha8(mask) => {
                let pixels = mask
                    .into_iter()
                    .map(|a| {
                        let v = a as u32;
                        (v << 16) | (v << 8) | v
                    })
                    .collect();
                Self::rgb32(self.width, self.height, pixels)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sentinel() {
        let bitmap = CoverageBitmap::empty();
        assert!(bitmap.is_empty());
        assert_eq!(bitmap.width(), 0);
        assert_eq!(bitmap.height(), 0);
    }

    #[test]
    fn alpha_to_rgb_conversion() {
        let bitmap = CoverageBitmap::alpha8(2, 1, vec![0x00, 0xff]);
        let rgb = bitmap.into_rgb32();
        match rgb.data() {
            CoverageData::Rgb32(px) => assert_eq!(px, &[0x000000, 0xffffff]),
            other => panic!("expected Rgb32, got {other:?}"),
        }
    }

    #[test]
    fn rgb_passthrough() {
        let bitmap = CoverageBitmap::rgb32(1, 1, vec![0x102030]);
        let same = bitmap.clone().into_rgb32();
        assert_eq!(same, bitmap);
    }
}
