//! Sprite sheet packing and frame extraction
//!
//! Frames are stacked top to bottom on one sheet, left aligned, in input
//! order. The sheet is as wide as the widest frame and as tall as all frames
//! together; uncovered pixels stay transparent.

use crate::pixel_codec::{CompositeLayer, CropRegion, ImageSize, PackOptions, PixelCodec};
use anim_core::{AnimError, Result, SpriteInfo};
use tracing::debug;

/// Packed sheet ready to be written as an ANIM pixel payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedSheet {
    pub pixel_payload: Vec<u8>,
    pub sprite_info: SpriteInfo,
}

/// Frame geometry for extraction by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Height of every frame on the sheet
    pub height: u32,
    /// Crop width; the full sheet width when `None`
    pub width: Option<u32>,
}

impl ExtractOptions {
    pub fn new(height: u32) -> Self {
        Self {
            height,
            width: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
}

/// Packs images into sheets and cuts frames back out, through a [`PixelCodec`]
#[derive(Debug, Clone, Default)]
pub struct SpriteSheetProcessor<C> {
    codec: C,
}

impl<C: PixelCodec> SpriteSheetProcessor<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Pack encoded images into a single vertically stacked sheet
    ///
    /// A single image is re-encoded without compositing. The resulting
    /// sprite table always holds exactly one sheet.
    pub async fn pack<I>(&self, images: &[I], options: &PackOptions) -> Result<PackedSheet>
    where
        I: AsRef<[u8]> + Sync,
    {
        match images {
            [] => Err(AnimError::ImageMerge {
                message: "no images to process".to_string(),
            }),
            [image] => {
                let size = self.codec.measure(image.as_ref()).await?;
                let pixel_payload = self.codec.encode(image.as_ref(), options).await?;
                debug!(width = size.width, height = size.height, "packed single image");
                Ok(PackedSheet {
                    pixel_payload,
                    sprite_info: SpriteInfo::single(size.width, size.height),
                })
            }
            _ => self.pack_stacked(images, options).await,
        }
    }

    async fn pack_stacked<I>(&self, images: &[I], options: &PackOptions) -> Result<PackedSheet>
    where
        I: AsRef<[u8]> + Sync,
    {
        // Measured in order so the first bad image is the one reported
        let mut sizes = Vec::with_capacity(images.len());
        for image in images {
            sizes.push(self.codec.measure(image.as_ref()).await?);
        }

        let mut layers = Vec::with_capacity(images.len());
        let mut canvas = ImageSize::new(0, 0);
        for (image, size) in images.iter().zip(&sizes) {
            layers.push(CompositeLayer {
                image: image.as_ref(),
                top: canvas.height,
                left: 0,
            });
            canvas.width = canvas.width.max(size.width);
            canvas.height = canvas.height.checked_add(size.height).ok_or_else(|| {
                AnimError::ImageMerge {
                    message: "stacked sheet height overflows u32".to_string(),
                }
            })?;
        }

        let pixel_payload = self.codec.composite(canvas, &layers, options).await?;
        debug!(
            images = images.len(),
            width = canvas.width,
            height = canvas.height,
            payload_len = pixel_payload.len(),
            "packed sprite sheet"
        );

        Ok(PackedSheet {
            pixel_payload,
            sprite_info: SpriteInfo::single(canvas.width, canvas.height),
        })
    }

    /// Cut frame `index` out of a sheet of equally tall frames
    ///
    /// Fails with `FrameExtraction` when the frame would end below the sheet.
    pub async fn extract_frame_by_index(
        &self,
        sheet: &[u8],
        index: u32,
        options: ExtractOptions,
    ) -> Result<Vec<u8>> {
        let size = self.codec.measure(sheet).await?;
        self.crop_frame(sheet, size, index, options).await
    }

    /// Cut an arbitrary rectangle out of a sheet
    pub async fn extract_frame_by_position(
        &self,
        sheet: &[u8],
        top: u32,
        left: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        let region = CropRegion {
            top,
            left,
            width,
            height,
        };
        self.codec.crop(sheet, region).await
    }

    /// Cut `count` consecutive frames, or as many whole frames as fit
    ///
    /// An explicit `count` reaching below the sheet fails with
    /// `FrameExtraction` before any frame is cut.
    pub async fn extract_all_frames(
        &self,
        sheet: &[u8],
        height: u32,
        count: Option<u32>,
    ) -> Result<Vec<Vec<u8>>> {
        if height == 0 {
            return Err(zero_height());
        }
        let size = self.codec.measure(sheet).await?;
        let fitting = size.height / height;
        let count = count.unwrap_or(fitting);
        if u64::from(count) * u64::from(height) > u64::from(size.height) {
            return Err(AnimError::FrameExtraction {
                message: format!(
                    "{count} frames of {height} rows do not fit a {} row sheet; frame {fitting} \
                     is the first past the bottom",
                    size.height
                ),
            });
        }

        let mut frames = Vec::new();
        for index in 0..count {
            frames.push(
                self.crop_frame(sheet, size, index, ExtractOptions::new(height))
                    .await?,
            );
        }
        debug!(count, height, "extracted frames");
        Ok(frames)
    }

    async fn crop_frame(
        &self,
        sheet: &[u8],
        size: ImageSize,
        index: u32,
        options: ExtractOptions,
    ) -> Result<Vec<u8>> {
        if options.height == 0 {
            return Err(zero_height());
        }

        let top = u64::from(index) * u64::from(options.height);
        let bottom = top + u64::from(options.height);
        if bottom > u64::from(size.height) {
            return Err(AnimError::FrameExtraction {
                message: format!(
                    "frame {index} spans rows {top}..{bottom} but the sheet is {} rows tall",
                    size.height
                ),
            });
        }

        let region = CropRegion {
            // bottom fits in u32, so top does too
            top: top as u32,
            left: 0,
            width: options.width.unwrap_or(size.width),
            height: options.height,
        };
        self.codec.crop(sheet, region).await
    }
}

fn zero_height() -> AnimError {
    AnimError::FrameExtraction {
        message: "frame height must be > 0".to_string(),
    }
}
