//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{ScreenMatchError, ScreenMatchResult};
use image::{DynamicImage, ExtendedColorType, RgbImage};
use std::path::Path;

/// Converts a decoded image to `channels` interleaved 8-bit channels.
///
/// 1 = luma, 2 = luma + alpha, 3 = RGB, 4 = RGBA.
pub fn owned_from_dynamic_image(
    img: &DynamicImage,
    channels: usize,
) -> ScreenMatchResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = match channels {
        1 => img.to_luma8().into_raw(),
        2 => img.to_luma_alpha8().into_raw(),
        3 => img.to_rgb8().into_raw(),
        4 => img.to_rgba8().into_raw(),
        _ => return Err(ScreenMatchError::InvalidChannels { channels }),
    };
    OwnedImage::new(data, width, height, channels)
}

/// Loads an image from disk and converts it to `channels` channels.
pub fn load_image<P: AsRef<Path>>(path: P, channels: usize) -> ScreenMatchResult<OwnedImage> {
    let img = image::open(path).map_err(|err| ScreenMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img, channels)
}

/// Loads an image from disk as 3-channel RGB.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> ScreenMatchResult<OwnedImage> {
    load_image(path, 3)
}

/// Expands or reduces any supported view to an RGB buffer.
///
/// Grayscale is replicated across channels and alpha is dropped.
pub fn rgb_from_view(view: ImageView<'_, u8>) -> ScreenMatchResult<RgbImage> {
    let width = view.width();
    let height = view.height();
    let channels = view.channels();
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        let row = view.row(y).ok_or(ScreenMatchError::BufferTooSmall {
            needed: y * view.stride() + width * channels,
            got: view.as_slice().len(),
        })?;
        for px in row.chunks_exact(channels) {
            match channels {
                1 | 2 => data.extend_from_slice(&[px[0], px[0], px[0]]),
                _ => data.extend_from_slice(&px[..3]),
            }
        }
    }
    RgbImage::from_raw(width as u32, height as u32, data)
        .ok_or(ScreenMatchError::InvalidDimensions { width, height })
}

/// Wraps an RGB buffer as an owned 3-channel image.
pub fn owned_from_rgb_image(img: RgbImage) -> ScreenMatchResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::new(img.into_raw(), width, height, 3)
}

/// Encodes an owned image to disk; the format follows the file extension.
pub fn save_image<P: AsRef<Path>>(img: &OwnedImage, path: P) -> ScreenMatchResult<()> {
    let color = match img.channels() {
        1 => ExtendedColorType::L8,
        2 => ExtendedColorType::La8,
        3 => ExtendedColorType::Rgb8,
        4 => ExtendedColorType::Rgba8,
        channels => return Err(ScreenMatchError::InvalidChannels { channels }),
    };
    image::save_buffer(
        path,
        img.data(),
        img.width() as u32,
        img.height() as u32,
        color,
    )
    .map_err(|err| ScreenMatchError::ImageIo {
        reason: err.to_string(),
    })
}
