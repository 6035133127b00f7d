//! Pixel codec capability
//!
//! Sprite sheet packing and frame extraction never touch pixels directly.
//! They go through [`PixelCodec`], which can measure, encode, composite and
//! crop encoded images. [`ImageCodec`] is the default implementation, backed
//! by the `image` crate and run on tokio's blocking pool.

use anim_core::{AnimError, Result};
use async_trait::async_trait;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use std::io::Cursor;

/// Width and height of an image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rectangle to cut out of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub top: u32,
    pub left: u32,
    pub width: u32,
    pub height: u32,
}

/// One encoded image placed on a composite canvas
#[derive(Debug, Clone, Copy)]
pub struct CompositeLayer<'a> {
    pub image: &'a [u8],
    pub top: u32,
    pub left: u32,
}

/// Container format for encoded sheets and frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetFormat {
    Png,
    #[default]
    WebP,
}

impl SheetFormat {
    fn image_format(self) -> ImageFormat {
        match self {
            SheetFormat::Png => ImageFormat::Png,
            SheetFormat::WebP => ImageFormat::WebP,
        }
    }
}

/// Encoding settings for packed sprite sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Keep every channel bit-exact
    pub lossless: bool,
    /// 1..=100, only consulted when `lossless` is false
    pub quality: u8,
    pub format: SheetFormat,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            lossless: true,
            quality: 80,
            format: SheetFormat::default(),
        }
    }
}

impl PackOptions {
    pub fn with_lossless(mut self, lossless: bool) -> Self {
        self.lossless = lossless;
        self
    }

    /// Set lossy quality, clamped to 1..=100
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub fn with_format(mut self, format: SheetFormat) -> Self {
        self.format = format;
        self
    }

    /// Low RGB bits dropped per channel in lossy mode
    pub fn precision_loss(&self) -> u8 {
        if self.lossless {
            0
        } else {
            (100 - self.quality.clamp(1, 100)) / 15
        }
    }
}

/// Capability for the pixel work sprite sheets need
///
/// Implementations must be safe to call concurrently; no state is shared
/// between calls.
#[async_trait]
pub trait PixelCodec: Send + Sync {
    /// Width and height of an encoded image
    async fn measure(&self, image: &[u8]) -> Result<ImageSize>;

    /// Re-encode an image as RGBA with the given options
    async fn encode(&self, image: &[u8], options: &PackOptions) -> Result<Vec<u8>>;

    /// Draw layers onto a transparent RGBA canvas and encode the result
    async fn composite(
        &self,
        canvas: ImageSize,
        layers: &[CompositeLayer<'_>],
        options: &PackOptions,
    ) -> Result<Vec<u8>>;

    /// Cut a region out of an encoded image
    async fn crop(&self, image: &[u8], region: CropRegion) -> Result<Vec<u8>>;
}

/// [`PixelCodec`] backed by the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec {
    format: SheetFormat,
}

impl ImageCodec {
    /// Codec writing crops in `format`
    pub fn new(format: SheetFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> SheetFormat {
        self.format
    }
}

#[async_trait]
impl PixelCodec for ImageCodec {
    async fn measure(&self, image: &[u8]) -> Result<ImageSize> {
        let image = image.to_vec();
        run_blocking(move || {
            let (width, height) = load(&image)?.dimensions();
            Ok(ImageSize::new(width, height))
        })
        .await
    }

    async fn encode(&self, image: &[u8], options: &PackOptions) -> Result<Vec<u8>> {
        let image = image.to_vec();
        let options = *options;
        run_blocking(move || encode_rgba(load(&image)?.to_rgba8(), &options)).await
    }

    async fn composite(
        &self,
        canvas: ImageSize,
        layers: &[CompositeLayer<'_>],
        options: &PackOptions,
    ) -> Result<Vec<u8>> {
        let layers: Vec<(Vec<u8>, u32, u32)> = layers
            .iter()
            .map(|layer| (layer.image.to_vec(), layer.top, layer.left))
            .collect();
        let options = *options;

        run_blocking(move || {
            let mut sheet = RgbaImage::new(canvas.width, canvas.height);
            for (image, top, left) in &layers {
                let layer = load(image)?.to_rgba8();
                // Layers never overlap, so pixels are copied without blending
                image::imageops::replace(&mut sheet, &layer, i64::from(*left), i64::from(*top));
            }
            encode_rgba(sheet, &options)
        })
        .await
    }

    async fn crop(&self, image: &[u8], region: CropRegion) -> Result<Vec<u8>> {
        let image = image.to_vec();
        let options = PackOptions::default().with_format(self.format);

        run_blocking(move || {
            let source = load(&image)?;
            let (width, height) = source.dimensions();
            let right = u64::from(region.left) + u64::from(region.width);
            let bottom = u64::from(region.top) + u64::from(region.height);

            if region.width == 0 || region.height == 0 {
                return Err(codec_error("crop region must not be empty"));
            }
            if right > u64::from(width) || bottom > u64::from(height) {
                return Err(codec_error(format!(
                    "crop region {}x{} at ({}, {}) exceeds {width}x{height} image",
                    region.width, region.height, region.left, region.top
                )));
            }

            let frame = source
                .crop_imm(region.left, region.top, region.width, region.height)
                .to_rgba8();
            encode_rgba(frame, &options)
        })
        .await
    }
}

/// Run CPU-bound pixel work off the async executor
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| codec_error(format!("pixel task failed: {err}")))?
}

fn codec_error(message: impl Into<String>) -> AnimError {
    AnimError::PixelCodec {
        message: message.into(),
    }
}

fn load(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|err| AnimError::InvalidImageData {
        message: format!("failed to decode image: {err}"),
    })
}

fn encode_rgba(mut image: RgbaImage, options: &PackOptions) -> Result<Vec<u8>> {
    reduce_precision(&mut image, options.precision_loss());

    let mut output = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut output), options.format.image_format())
        .map_err(|err| codec_error(format!("failed to encode {:?}: {err}", options.format)))?;
    Ok(output)
}

/// Clear the low `bits` of each colour channel; alpha is left intact
fn reduce_precision(image: &mut RgbaImage, bits: u8) {
    if bits == 0 {
        return;
    }
    let mask = 0xFFu8 << bits;
    for pixel in image.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel &= mask;
        }
    }
}
