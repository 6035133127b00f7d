#![allow(dead_code)]

use anim::pixel_codec::{CompositeLayer, CropRegion};
use anim::{AnimResult, ImageCodec, ImageSize, PackOptions, PixelCodec, SheetFormat};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const GREEN: [u8; 4] = [0, 255, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];

pub fn png_options() -> PackOptions {
    PackOptions::default().with_format(SheetFormat::Png)
}

pub fn png_codec() -> ImageCodec {
    ImageCodec::new(SheetFormat::Png)
}

/// PNG bytes of a single-colour image
pub fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64_STANDARD.encode(png))
}

pub fn base64(png: &[u8]) -> String {
    BASE64_STANDARD.encode(png)
}

pub fn rgba(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

pub fn pixel(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    image.get_pixel(x, y).0
}

/// The three frames used throughout: 80x50, 120x50 and 100x50
pub fn three_frames() -> Vec<Vec<u8>> {
    vec![
        solid_png(80, 50, RED),
        solid_png(120, 50, GREEN),
        solid_png(100, 50, BLUE),
    ]
}

/// Image codec that counts the calls made through it
#[derive(Debug, Default)]
pub struct RecordingCodec {
    inner: ImageCodec,
    pub encodes: AtomicUsize,
    pub composites: AtomicUsize,
    pub crops: AtomicUsize,
}

impl RecordingCodec {
    pub fn new() -> Self {
        Self {
            inner: png_codec(),
            ..Self::default()
        }
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PixelCodec for RecordingCodec {
    async fn measure(&self, image: &[u8]) -> AnimResult<ImageSize> {
        self.inner.measure(image).await
    }

    async fn encode(&self, image: &[u8], options: &PackOptions) -> AnimResult<Vec<u8>> {
        self.encodes.fetch_add(1, Ordering::SeqCst);
        self.inner.encode(image, options).await
    }

    async fn composite(
        &self,
        canvas: ImageSize,
        layers: &[CompositeLayer<'_>],
        options: &PackOptions,
    ) -> AnimResult<Vec<u8>> {
        self.composites.fetch_add(1, Ordering::SeqCst);
        self.inner.composite(canvas, layers, options).await
    }

    async fn crop(&self, image: &[u8], region: CropRegion) -> AnimResult<Vec<u8>> {
        self.crops.fetch_add(1, Ordering::SeqCst);
        self.inner.crop(image, region).await
    }
}
