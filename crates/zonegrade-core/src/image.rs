//! 8-bit interleaved pixel buffers for the grading pipeline.

use ::image::imageops::FilterType;
use ::image::{DynamicImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ZoneError};

/// Widest preview proxy graded on every parameter change.
pub const PREVIEW_MAX_WIDTH: u32 = 1200;

/// Interleaved channel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channels {
    /// R, G, B.
    Rgb,
    /// R, G, B, A. Alpha passes through grading untouched.
    Rgba,
}

impl Channels {
    /// Samples per pixel.
    pub const fn count(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub fn from_count(count: usize) -> Result<Self> {
        match count {
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(ZoneError::UnsupportedChannels(other)),
        }
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb => write!(f, "RGB"),
            Self::Rgba => write!(f, "RGBA"),
        }
    }
}

/// Gamma-encoded 8-bit image, row-major, no row padding.
///
/// `data.len()` is always `width × height × channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing samples, checking the length against the dimensions.
    pub fn new(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        let expected = Self::sample_count(width, height, channels);
        if data.len() != expected {
            return Err(ZoneError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A buffer filled with one pixel value.
    ///
    /// `pixel` must hold at least `channels.count()` samples; extra samples
    /// are ignored.
    pub fn filled(width: u32, height: u32, channels: Channels, pixel: &[u8]) -> Result<Self> {
        let n = channels.count();
        let Some(sample) = pixel.get(..n) else {
            return Err(ZoneError::BufferSize {
                expected: n,
                actual: pixel.len(),
            });
        };
        let data = sample.repeat(width as usize * height as usize);
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    fn sample_count(width: u32, height: u32, channels: Channels) -> usize {
        width as usize * height as usize * channels.count()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw interleaved samples.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Samples of the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels.count();
        let start = (y as usize * self.width as usize + x as usize) * n;
        Some(&self.data[start..start + n])
    }

    /// A downscaled copy at most `max_width` pixels wide, for interactive
    /// preview.
    ///
    /// Keeps the aspect ratio and never upscales: buffers already narrow
    /// enough come back as an unchanged copy.
    pub fn preview_proxy(&self, max_width: u32) -> PixelBuffer {
        let max_width = max_width.max(1);
        if self.width <= max_width || self.height == 0 {
            return self.clone();
        }

        let scale = max_width as f64 / self.width as f64;
        let height = ((self.height as f64 * scale).round() as u32).max(1);

        tracing::debug!(
            "preview proxy {}x{} -> {}x{}",
            self.width,
            self.height,
            max_width,
            height
        );

        let image: DynamicImage = self.clone().into();
        image.resize_exact(max_width, height, FilterType::Triangle).into()
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            channels: Channels::Rgb,
            data: image.into_raw(),
        }
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            channels: Channels::Rgba,
            data: image.into_raw(),
        }
    }
}

impl From<DynamicImage> for PixelBuffer {
    /// Keeps 8-bit RGB as RGB; everything else is converted to 8-bit RGBA.
    fn from(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageRgb8(rgb) => rgb.into(),
            other => other.into_rgba8().into(),
        }
    }
}

impl From<PixelBuffer> for DynamicImage {
    fn from(buffer: PixelBuffer) -> Self {
        let PixelBuffer {
            width,
            height,
            channels,
            data,
        } = buffer;
        // Length is checked on construction, so from_raw cannot fail here.
        match channels {
            Channels::Rgb => RgbImage::from_raw(width, height, data)
                .map(DynamicImage::ImageRgb8)
                .unwrap_or_else(|| DynamicImage::new_rgb8(width, height)),
            Channels::Rgba => RgbaImage::from_raw(width, height, data)
                .map(DynamicImage::ImageRgba8)
                .unwrap_or_else(|| DynamicImage::new_rgba8(width, height)),
        }
    }
}
