//! Annotated debug rendering of match results.
//!
//! Available when the `image-io` feature is enabled. The search region is
//! outlined in green when it is narrower than the image; every result gets a
//! two pixel red box labelled `"{i}: {score:.3}"`.

use crate::geometry::Rect;
use crate::image::io::{owned_from_rgb_image, rgb_from_view};
use crate::image::{ImageView, OwnedImage};
use crate::result::MatchResult;
use crate::util::{ScreenMatchError, ScreenMatchResult};
use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect as DrawRect;

const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const ROI_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const BOX_THICKNESS: i32 = 2;
const LABEL_PX: f32 = 14.0;
const LABEL_GAP: i32 = 5;

const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Draws `results` (and the search region, if partial) over an RGB copy of
/// `image`.
pub fn render_matches(
    image: ImageView<'_, u8>,
    roi: Rect,
    results: &[MatchResult],
) -> ScreenMatchResult<OwnedImage> {
    let font = FontRef::try_from_slice(FONT_DATA).map_err(|_| ScreenMatchError::ImageIo {
        reason: "failed to load label font".into(),
    })?;
    let mut canvas = rgb_from_view(image)?;
    let full = Rect::new(0, 0, image.width() as i32, image.height() as i32);
    if roi != full {
        draw_box(&mut canvas, roi, ROI_COLOR, 1);
    }
    for (i, m) in results.iter().enumerate() {
        draw_box(&mut canvas, m.rect, BOX_COLOR, BOX_THICKNESS);
        let label = format!("{i}: {:.3}", m.score);
        let top = (m.rect.y - LABEL_GAP - LABEL_PX as i32).max(0);
        draw_label(&mut canvas, &font, &label, m.rect.x, top);
    }
    owned_from_rgb_image(canvas)
}

fn draw_box(canvas: &mut RgbImage, rect: Rect, color: Rgb<u8>, thickness: i32) {
    for inset in 0..thickness {
        let width = rect.width - 2 * inset;
        let height = rect.height - 2 * inset;
        if width <= 0 || height <= 0 {
            break;
        }
        let outline =
            DrawRect::at(rect.x + inset, rect.y + inset).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, outline, color);
    }
}

fn draw_label(canvas: &mut RgbImage, font: &FontRef<'_>, text: &str, x: i32, y: i32) {
    draw_text_mut(canvas, BOX_COLOR, x, y, PxScale::from(LABEL_PX), font, text);
}
