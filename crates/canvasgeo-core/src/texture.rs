//! Procedural brush stamps for the raster paint engine.
//!
//! Stamps are small RGBA8 bitmaps, black with varying alpha. Grain stamps are
//! a pure function of their parameters and can be cached; spray stamps are not
//! reproducible unless the caller supplies a seeded random source.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default probability that a spray pixel is painted.
pub const DEFAULT_SPRAY_DENSITY: f64 = 0.1;

/// Default grain threshold at the stamp center.
pub const DEFAULT_GRAIN_THRESHOLD: f64 = 0.5;

/// Texture errors.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("Invalid brush texture: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for texture operations.
pub type TextureResult<T> = Result<T, TextureError>;

/// Row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// RGBA of one pixel, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Write one pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn to_png(&self) -> TextureResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.data)?;
            writer.finish()?;
        }
        Ok(png_data)
    }
}

/// Black pixel with the given alpha.
const fn ink(alpha: u8) -> [u8; 4] {
    [0, 0, 0, alpha]
}

/// Spray stamp using the thread-local random source.
pub fn spray(width: u32, height: u32, density: f64) -> Bitmap {
    spray_with_rng(width, height, density, &mut rand::rng())
}

/// Spray stamp: each pixel is opaque black with probability `density`.
pub fn spray_with_rng<R: Rng>(width: u32, height: u32, density: f64, rng: &mut R) -> Bitmap {
    let mut bitmap = Bitmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if rng.random::<f64>() < density {
                bitmap.set_pixel(x, y, ink(255));
            }
        }
    }
    log::trace!("Generated {}x{} spray stamp (density {})", width, height, density);
    bitmap
}

/// Seedless value noise in `[0, 1)` for integer coordinates.
fn noise(x: u32, y: u32) -> f64 {
    let mut h = x
        .wrapping_mul(374_761_393)
        .wrapping_add(y.wrapping_mul(668_265_263));
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    f64::from(h >> 8) / f64::from(1u32 << 24)
}

/// Grain stamp: soft noise, denser toward the center.
///
/// Distance is sampled at pixel centers and normalized so that 1 falls on the
/// stamp's outer corner. Output depends only on `(width, height, threshold)`.
pub fn grain(width: u32, height: u32, threshold: f64) -> Bitmap {
    let mut bitmap = Bitmap::new(width, height);
    let cx = f64::from(width) / 2.0;
    let cy = f64::from(height) / 2.0;
    let max_dist = cx.hypot(cy);

    for y in 0..height {
        for x in 0..width {
            let dist = (f64::from(x) + 0.5 - cx).hypot(f64::from(y) + 0.5 - cy);
            let norm_dist = if max_dist > 0.0 { dist / max_dist } else { 0.0 };
            let falloff = 1.0 - norm_dist;
            let effective_threshold = threshold * falloff * falloff;

            let n = noise(x, y);
            if n < effective_threshold {
                let alpha = (255.0 * (1.0 - n / effective_threshold)).round();
                bitmap.set_pixel(x, y, ink(alpha.clamp(0.0, 255.0) as u8));
            }
        }
    }
    log::trace!("Generated {}x{} grain stamp (threshold {})", width, height, threshold);
    bitmap
}

/// Fully opaque black square.
pub fn solid_square(width: u32, height: u32) -> Bitmap {
    let mut bitmap = Bitmap::new(width, height);
    for px in bitmap.data.chunks_exact_mut(4) {
        px.copy_from_slice(&ink(255));
    }
    bitmap
}

/// Brush stamp configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BrushTexture {
    Spray {
        #[serde(default = "default_density")]
        density: f64,
    },
    Grain {
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    #[default]
    Solid,
}

fn default_density() -> f64 {
    DEFAULT_SPRAY_DENSITY
}

fn default_threshold() -> f64 {
    DEFAULT_GRAIN_THRESHOLD
}

impl BrushTexture {
    /// Parse a brush texture from JSON, e.g. `{"type": "grain", "threshold": 0.4}`.
    pub fn from_json(json: &str) -> TextureResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether two generations with the same size give identical output.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, BrushTexture::Spray { .. })
    }

    /// Generate a stamp of the given size.
    pub fn generate(&self, width: u32, height: u32) -> Bitmap {
        match *self {
            BrushTexture::Spray { density } => spray(width, height, density),
            BrushTexture::Grain { threshold } => grain(width, height, threshold),
            BrushTexture::Solid => solid_square(width, height),
        }
    }
}
