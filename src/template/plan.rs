//! Template plan precomputation shared by every correlation algorithm.

use crate::image::{ImageView, MAX_CHANNELS};
use crate::util::{ScreenMatchError, ScreenMatchResult};

/// Precomputed statistics and buffers for one (optionally masked) template.
///
/// Masked-out pixels contribute zero to every buffer and statistic, so the
/// kernels can skip them without special cases.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    channels: usize,
    mask: Vec<u8>,
    active: usize,
    values: Vec<f64>,
    zero_mean: Vec<f64>,
    means: [f64; MAX_CHANNELS],
    sum_sq: f64,
    zero_mean_sq: f64,
}

impl TemplatePlan {
    /// Builds a plan from a template view and an optional per-pixel mask.
    ///
    /// Mask entries of `0` exclude the pixel; any other value keeps it.
    pub fn from_view(tpl: ImageView<'_, u8>, mask: Option<Vec<u8>>) -> ScreenMatchResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let channels = tpl.channels();
        let pixels = width
            .checked_mul(height)
            .ok_or(ScreenMatchError::InvalidDimensions { width, height })?;

        let mask = match mask {
            Some(mask) if mask.len() != pixels => {
                return Err(ScreenMatchError::InvalidMask {
                    expected: pixels,
                    got: mask.len(),
                })
            }
            Some(mask) => mask,
            None => vec![255u8; pixels],
        };
        let active = mask.iter().filter(|&&m| m != 0).count();

        let mut values = Vec::with_capacity(pixels * channels);
        let mut sums = [0.0f64; MAX_CHANNELS];
        let mut sum_sq = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).ok_or(ScreenMatchError::BufferTooSmall {
                needed: y * tpl.stride() + width * channels,
                got: tpl.as_slice().len(),
            })?;
            for (x, px) in row.chunks_exact(channels).enumerate() {
                let keep = mask[y * width + x] != 0;
                for (c, &value) in px.iter().enumerate() {
                    let v = if keep { f64::from(value) } else { 0.0 };
                    sums[c] += v;
                    sum_sq += v * v;
                    values.push(v);
                }
            }
        }

        let mut means = [0.0f64; MAX_CHANNELS];
        if active > 0 {
            for (mean, sum) in means.iter_mut().zip(sums.iter()).take(channels) {
                *mean = sum / active as f64;
            }
        }

        let mut zero_mean = Vec::with_capacity(values.len());
        let mut zero_mean_sq = 0.0f64;
        for (idx, &v) in values.iter().enumerate() {
            let pixel = idx / channels;
            let zm = if mask[pixel] != 0 {
                v - means[idx % channels]
            } else {
                0.0
            };
            zero_mean_sq += zm * zm;
            zero_mean.push(zm);
        }

        Ok(Self {
            width,
            height,
            channels,
            mask,
            active,
            values,
            zero_mean,
            means,
            sum_sq,
            zero_mean_sq,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Per-pixel mask in row-major order (`0` = ignored).
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// Number of pixels that take part in scoring.
    pub fn active_pixels(&self) -> usize {
        self.active
    }

    /// Template values (masked pixels zeroed), interleaved row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mean-subtracted template values (masked pixels zeroed).
    pub fn zero_mean(&self) -> &[f64] {
        &self.zero_mean
    }

    /// Mean of each channel over active pixels.
    pub fn means(&self) -> &[f64] {
        &self.means[..self.channels]
    }

    /// Sum of squared template values over active pixels.
    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    /// Sum of squared mean-subtracted values over active pixels.
    pub fn zero_mean_sq(&self) -> f64 {
        self.zero_mean_sq
    }
}
