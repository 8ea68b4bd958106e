//! Rayon-parallel kernel (feature-gated).
//!
//! Rows of the score surface are computed in parallel with the scalar window
//! scorer, so results are bit-identical to [`ScalarKernel`].
//!
//! [`ScalarKernel`]: crate::kernel::scalar::ScalarKernel

use crate::image::ImageView;
use crate::kernel::scalar::window_score;
use crate::kernel::{surface_size, Kernel, ScoreSurface};
use crate::metric::Algorithm;
use crate::template::TemplatePlan;
use crate::util::ScreenMatchResult;
use rayon::prelude::*;

/// Row-parallel kernel.
pub struct RowParallelKernel;

impl Kernel for RowParallelKernel {
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        algorithm: Algorithm,
        x: usize,
        y: usize,
    ) -> f32 {
        match surface_size(image, plan) {
            Ok((width, height)) if x < width && y < height => {
                window_score(image, plan, algorithm, x, y)
            }
            _ => f32::NAN,
        }
    }

    fn scan_full(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        algorithm: Algorithm,
    ) -> ScreenMatchResult<ScoreSurface> {
        let (width, height) = surface_size(image, plan)?;

        // Parallel scan over rows
        let rows: Vec<Vec<f32>> = (0..height)
            .into_par_iter()
            .map(|y| {
                (0..width)
                    .map(|x| window_score(image, plan, algorithm, x, y))
                    .collect()
            })
            .collect();

        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            data.extend(row);
        }
        Ok(ScoreSurface::from_vec(data, width, height))
    }
}
