//! Image views, owned buffers and region-of-interest extraction.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer of interleaved channels
//! with an explicit stride. The stride counts elements between the starts of
//! consecutive rows, so a stride larger than `width * channels` represents
//! padded rows. ROI slices are zero-copy views into the same backing slice and
//! retain the original stride.

use crate::geometry::Rect;
use crate::util::{ScreenMatchError, ScreenMatchResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod roi;

/// Largest supported number of interleaved channels.
pub const MAX_CHANNELS: usize = 4;

/// Borrowed 2D image view with interleaved channels and an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width * channels`.
    pub fn from_slice(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
    ) -> ScreenMatchResult<Self> {
        let row_len = width
            .checked_mul(channels)
            .ok_or(ScreenMatchError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, channels, row_len)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> ScreenMatchResult<Self> {
        let needed = required_len(width, height, channels, stride)?;
        if data.len() < needed {
            return Err(ScreenMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the channel values of pixel `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [T]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y
            .checked_mul(self.stride)?
            .checked_add(x.checked_mul(self.channels)?)?;
        self.data.get(start..start + self.channels)
    }

    /// Returns a contiguous slice for row `y` with length `width * channels`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> ScreenMatchResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(ScreenMatchError::InvalidDimensions { width, height });
        }
        let end_x = x.checked_add(width);
        let end_y = y.checked_add(height);
        let inside = matches!((end_x, end_y), (Some(ex), Some(ey)) if ex <= self.width && ey <= self.height);
        if !inside {
            return Err(ScreenMatchError::InvalidRegion {
                roi: Rect::new(
                    clamp_i32(x),
                    clamp_i32(y),
                    clamp_i32(width),
                    clamp_i32(height),
                ),
                img_width: self.width,
                img_height: self.height,
            });
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x * self.channels))
            .ok_or(ScreenMatchError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(ScreenMatchError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.channels, self.stride)
    }
}

fn clamp_i32(value: usize) -> i32 {
    value.min(i32::MAX as usize) as i32
}

fn required_len(
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
) -> ScreenMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(ScreenMatchError::InvalidDimensions { width, height });
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(ScreenMatchError::InvalidChannels { channels });
    }
    let row_len = width
        .checked_mul(channels)
        .ok_or(ScreenMatchError::InvalidDimensions { width, height })?;
    if stride < row_len {
        return Err(ScreenMatchError::InvalidStride { row_len, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(ScreenMatchError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Owned contiguous 8-bit image with interleaved channels.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl OwnedImage {
    /// Wraps a packed row-major buffer of exactly `width * height * channels` bytes.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> ScreenMatchResult<Self> {
        let needed = required_len(width, height, channels, width.saturating_mul(channels))?;
        if data.len() < needed {
            return Err(ScreenMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ScreenMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Copies a (possibly strided) view into a packed buffer.
    pub fn from_view(view: ImageView<'_, u8>) -> ScreenMatchResult<Self> {
        let row_len = view.width() * view.channels();
        let mut data = Vec::with_capacity(row_len * view.height());
        for y in 0..view.height() {
            let row = view.row(y).ok_or(ScreenMatchError::BufferTooSmall {
                needed: y * view.stride() + row_len,
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height(), view.channels())
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the packed pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns the packed pixel data.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageView, OwnedImage};
    use crate::util::ScreenMatchError;

    #[test]
    fn pixel_reads_interleaved_channels() {
        let data: Vec<u8> = (0u8..24).collect();
        let view = ImageView::from_slice(&data, 4, 2, 3).unwrap();
        assert_eq!(view.pixel(1, 0).unwrap(), &[3u8, 4, 5]);
        assert_eq!(view.pixel(3, 1).unwrap(), &[21u8, 22, 23]);
        assert!(view.pixel(4, 0).is_none());
        assert_eq!(view.row(1).unwrap().len(), 12);
    }

    #[test]
    fn from_view_packs_strided_rows() {
        let data: Vec<u8> = (0u8..16).collect();
        let view = ImageView::from_slice(&data, 4, 4, 1).unwrap();
        let roi = view.roi(1, 1, 2, 2).unwrap();
        let owned = OwnedImage::from_view(roi).unwrap();
        assert_eq!(owned.data(), &[5u8, 6, 9, 10]);
    }

    #[test]
    fn owned_rejects_oversized_buffer() {
        let err = OwnedImage::new(vec![0u8; 7], 2, 3, 1).err().unwrap();
        assert_eq!(
            err,
            ScreenMatchError::InvalidDimensions {
                width: 2,
                height: 3
            }
        );
    }

    #[test]
    fn rejects_unsupported_channel_count() {
        let data = [0u8; 10];
        let err = ImageView::from_slice(&data, 1, 2, 5).err().unwrap();
        assert_eq!(err, ScreenMatchError::InvalidChannels { channels: 5 });
    }
}
