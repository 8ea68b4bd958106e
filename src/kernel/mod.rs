//! Correlation kernels producing dense score surfaces.
//!
//! A surface holds one score per valid top-left placement of the template
//! inside the search region: `(search_h - tpl_h + 1)` rows of
//! `(search_w - tpl_w + 1)` columns. Placements whose normalisation
//! denominator vanishes score `NaN`.

use crate::image::ImageView;
use crate::metric::{Algorithm, Method};
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::{ScreenMatchError, ScreenMatchResult};

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Dense row-major grid of scores.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSurface {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ScoreSurface {
    pub(crate) fn from_vec(data: Vec<f32>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Number of horizontal placements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertical placements.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Score of placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Scores of placement row `y`.
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        self.data.get(y * self.width..(y + 1) * self.width)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Remaps every score `s` to `1 - s`.
    pub fn invert(&mut self) {
        for score in self.data.iter_mut() {
            *score = 1.0 - *score;
        }
    }
}

/// Kernel trait for scoring and full-surface scans.
pub trait Kernel {
    /// Computes the score of a single placement (top-left coordinates).
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        algorithm: Algorithm,
        x: usize,
        y: usize,
    ) -> f32;

    /// Scores every valid placement of `plan` inside `image`.
    fn scan_full(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        algorithm: Algorithm,
    ) -> ScreenMatchResult<ScoreSurface>;
}

/// Checks that `plan` can be scanned over `image`; returns the surface size.
pub(crate) fn surface_size(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
) -> ScreenMatchResult<(usize, usize)> {
    if image.channels() != plan.channels() {
        return Err(ScreenMatchError::ChannelMismatch {
            expected: image.channels(),
            got: plan.channels(),
        });
    }
    if image.width() < plan.width() || image.height() < plan.height() {
        return Err(ScreenMatchError::TemplateTooLarge {
            tpl_width: plan.width(),
            tpl_height: plan.height(),
            img_width: image.width(),
            img_height: image.height(),
        });
    }
    Ok((
        image.width() - plan.width() + 1,
        image.height() - plan.height() + 1,
    ))
}

/// Runs one correlation pass of `plan` over the search region.
///
/// Returns `Ok(None)` when the template cannot be placed at all: it is larger
/// than the region in either axis, or its mask excludes every pixel.
/// Inverted methods are remapped before returning.
pub fn correlate(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    method: Method,
    parallel: bool,
) -> ScreenMatchResult<Option<ScoreSurface>> {
    let _span = trace_span!(
        "correlate",
        algorithm = method.algorithm.name(),
        inverted = method.inverted
    )
    .entered();

    if image.width() < plan.width() || image.height() < plan.height() {
        trace_event!(
            "template_larger_than_region",
            tpl_width = plan.width(),
            tpl_height = plan.height()
        );
        return Ok(None);
    }
    if plan.active_pixels() == 0 {
        trace_event!("template_fully_masked", tpl_width = plan.width());
        return Ok(None);
    }

    let mut surface = scan(image, plan, method.algorithm, parallel)?;
    if method.inverted {
        surface.invert();
    }
    Ok(Some(surface))
}

#[cfg(feature = "rayon")]
fn scan(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    algorithm: Algorithm,
    parallel: bool,
) -> ScreenMatchResult<ScoreSurface> {
    if parallel {
        <self::rayon::RowParallelKernel as Kernel>::scan_full(image, plan, algorithm)
    } else {
        <scalar::ScalarKernel as Kernel>::scan_full(image, plan, algorithm)
    }
}

#[cfg(not(feature = "rayon"))]
fn scan(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    algorithm: Algorithm,
    _parallel: bool,
) -> ScreenMatchResult<ScoreSurface> {
    <scalar::ScalarKernel as Kernel>::scan_full(image, plan, algorithm)
}
