//! Chroma-key masks.
//!
//! Mask entries are `255` for pixels that take part in scoring and `0` for
//! pixels that are ignored.

use crate::image::ImageView;

/// Colour that marks "ignore" pixels inside a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChromaKey {
    /// Key colour in RGB order (the first three channels).
    pub color: [u8; 3],
    /// Per-channel absolute tolerance; `0` requires an exact match.
    pub tolerance: u8,
}

impl Default for ChromaKey {
    fn default() -> Self {
        Self {
            color: [0, 255, 0],
            tolerance: 0,
        }
    }
}

impl ChromaKey {
    /// True when the first three channels of `px` match the key colour.
    pub fn matches(&self, px: &[u8]) -> bool {
        px.iter()
            .zip(self.color.iter())
            .all(|(&v, &k)| v.abs_diff(k) <= self.tolerance)
    }
}

/// Derives a per-pixel mask from a template.
///
/// Returns `None` for templates with fewer than three channels; masking is a
/// no-op for them.
pub fn chroma_key_mask(tpl: ImageView<'_, u8>, key: ChromaKey) -> Option<Vec<u8>> {
    let channels = tpl.channels();
    if channels < 3 {
        return None;
    }
    let mut mask = Vec::with_capacity(tpl.width() * tpl.height());
    for y in 0..tpl.height() {
        let row = tpl.row(y)?;
        for px in row.chunks_exact(channels) {
            mask.push(if key.matches(&px[..3]) { 0 } else { 255 });
        }
    }
    Some(mask)
}
