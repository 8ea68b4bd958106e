//! Region-of-interest extraction.
//!
//! The extractor never clamps: a region that is empty, negative or not fully
//! inside the image is reported as `InvalidRegion`. Callers that prefer
//! clipping can run [`Rect::clamp_to`] first.

use crate::geometry::Rect;
use crate::image::ImageView;
use crate::util::{ScreenMatchError, ScreenMatchResult};

/// A search region together with its placement in image coordinates.
#[derive(Copy, Clone, Debug)]
pub struct Roi<'a> {
    view: ImageView<'a, u8>,
    rect: Rect,
}

impl<'a> Roi<'a> {
    /// Returns the clipped pixel view.
    pub fn view(&self) -> ImageView<'a, u8> {
        self.view
    }

    /// Returns the region in image coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns the offset added to local coordinates.
    pub fn offset(&self) -> (i32, i32) {
        (self.rect.x, self.rect.y)
    }

    /// Maps a local top-left placement back into image coordinates.
    pub fn to_image(&self, x: usize, y: usize, width: usize, height: usize) -> Rect {
        Rect::new(
            self.rect.x + x as i32,
            self.rect.y + y as i32,
            width as i32,
            height as i32,
        )
    }
}

/// Clips `image` to `roi`, or returns the whole image when `roi` is `None`.
pub fn extract_roi(image: ImageView<'_, u8>, roi: Option<Rect>) -> ScreenMatchResult<Roi<'_>> {
    let img_width = image.width();
    let img_height = image.height();
    let rect = match roi {
        Some(rect) => rect,
        None => {
            if img_width > i32::MAX as usize || img_height > i32::MAX as usize {
                return Err(ScreenMatchError::InvalidDimensions {
                    width: img_width,
                    height: img_height,
                });
            }
            return Ok(Roi {
                view: image,
                rect: Rect::new(0, 0, img_width as i32, img_height as i32),
            });
        }
    };

    if !rect.fits_within(img_width, img_height) {
        return Err(ScreenMatchError::InvalidRegion {
            roi: rect,
            img_width,
            img_height,
        });
    }

    let view = image.roi(
        rect.x as usize,
        rect.y as usize,
        rect.width as usize,
        rect.height as usize,
    )?;
    Ok(Roi { view, rect })
}
