//! Scalar reference kernel for all six correlation algorithms.
//!
//! Window sums are accumulated in `f64` over active template pixels and all
//! channels, then finished per algorithm:
//!
//! - `SqDiff`: `sum (T - I)^2`
//! - `SqDiffNormed`: `SqDiff / sqrt(sum T^2 * sum I^2)`
//! - `CCorr`: `sum T * I`
//! - `CCorrNormed`: `CCorr / sqrt(sum T^2 * sum I^2)`
//! - `CCoeff`: `sum T' * I'` with per-channel means removed
//! - `CCoeffNormed`: `CCoeff / sqrt(sum T'^2 * sum I'^2)`

use crate::image::{ImageView, MAX_CHANNELS};
use crate::kernel::{surface_size, Kernel, ScoreSurface};
use crate::metric::Algorithm;
use crate::template::TemplatePlan;
use crate::util::ScreenMatchResult;

/// Squared normalisers at or below this value produce `NaN`.
const MIN_NORM_SQ: f64 = 1e-8;

/// Scalar single-threaded kernel.
pub struct ScalarKernel;

#[derive(Default)]
struct WindowSums {
    dot: f64,
    dot_zero_mean: f64,
    sum_sq: f64,
    sums: [f64; MAX_CHANNELS],
}

/// Scores one placement; shared with the row-parallel kernel.
pub(crate) fn window_score(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    algorithm: Algorithm,
    x: usize,
    y: usize,
) -> f32 {
    let channels = plan.channels();
    let tpl_width = plan.width();
    let row_len = tpl_width * channels;
    let mask = plan.mask();
    let values = plan.values();
    let zero_mean = plan.zero_mean();

    let mut acc = WindowSums::default();
    for ty in 0..plan.height() {
        let img_row = match image.row(y + ty) {
            Some(row) if row.len() >= (x + tpl_width) * channels => {
                &row[x * channels..x * channels + row_len]
            }
            _ => return f32::NAN,
        };
        let base = ty * tpl_width;
        for tx in 0..tpl_width {
            if mask[base + tx] == 0 {
                continue;
            }
            let tpl_idx = (base + tx) * channels;
            let px = &img_row[tx * channels..(tx + 1) * channels];
            for (c, &value) in px.iter().enumerate() {
                let i = f64::from(value);
                acc.dot += values[tpl_idx + c] * i;
                acc.dot_zero_mean += zero_mean[tpl_idx + c] * i;
                acc.sum_sq += i * i;
                acc.sums[c] += i;
            }
        }
    }

    finish(plan, algorithm, &acc) as f32
}

fn finish(plan: &TemplatePlan, algorithm: Algorithm, acc: &WindowSums) -> f64 {
    match algorithm {
        Algorithm::SqDiff => sq_diff(plan, acc),
        Algorithm::SqDiffNormed => normalize(sq_diff(plan, acc), plan.sum_sq() * acc.sum_sq),
        Algorithm::CCorr => acc.dot,
        Algorithm::CCorrNormed => normalize(acc.dot, plan.sum_sq() * acc.sum_sq),
        // Template zero-mean values sum to zero per channel, so the image mean
        // drops out of the numerator.
        Algorithm::CCoeff => acc.dot_zero_mean,
        Algorithm::CCoeffNormed => {
            let n = plan.active_pixels() as f64;
            let mean_sq: f64 = acc.sums[..plan.channels()]
                .iter()
                .map(|s| s * s / n)
                .sum();
            let var_i = acc.sum_sq - mean_sq;
            normalize(acc.dot_zero_mean, plan.zero_mean_sq() * var_i)
        }
    }
}

fn sq_diff(plan: &TemplatePlan, acc: &WindowSums) -> f64 {
    (plan.sum_sq() - 2.0 * acc.dot + acc.sum_sq).max(0.0)
}

fn normalize(num: f64, denom_sq: f64) -> f64 {
    if denom_sq <= MIN_NORM_SQ {
        return f64::NAN;
    }
    num / denom_sq.sqrt()
}

impl Kernel for ScalarKernel {
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
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(window_score(image, plan, algorithm, x, y));
            }
        }
        Ok(ScoreSurface::from_vec(data, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::ScalarKernel;
    use crate::image::ImageView;
    use crate::kernel::Kernel;
    use crate::metric::Algorithm;
    use crate::template::TemplatePlan;
    use crate::util::ScreenMatchError;

    fn pattern(width: usize, height: usize, seed: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(((x * 17 + y * 9 + x * y + seed) & 0xFF) as u8);
            }
        }
        data
    }

    #[test]
    fn ccoeff_normed_scan_matches_bruteforce() {
        let (img_width, img_height) = (6, 5);
        let image = pattern(img_width, img_height, 0);
        let (tpl_width, tpl_height) = (3, 2);
        let tpl = pattern(tpl_width, tpl_height, 5);

        let image_view = ImageView::from_slice(&image, img_width, img_height, 1).unwrap();
        let tpl_view = ImageView::from_slice(&tpl, tpl_width, tpl_height, 1).unwrap();
        let plan = TemplatePlan::from_view(tpl_view, None).unwrap();
        let surface =
            <ScalarKernel as Kernel>::scan_full(image_view, &plan, Algorithm::CCoeffNormed)
                .unwrap();
        assert_eq!(surface.width(), 4);
        assert_eq!(surface.height(), 4);

        let n = (tpl_width * tpl_height) as f64;
        let t_mean = tpl.iter().map(|&v| v as f64).sum::<f64>() / n;
        for y in 0..=(img_height - tpl_height) {
            for x in 0..=(img_width - tpl_width) {
                let mut window = Vec::new();
                for ty in 0..tpl_height {
                    let row = image_view.row(y + ty).unwrap();
                    window.extend(row[x..x + tpl_width].iter().map(|&v| v as f64));
                }
                let i_mean = window.iter().sum::<f64>() / n;
                let mut num = 0.0;
                let mut var_t = 0.0;
                let mut var_i = 0.0;
                for (t, i) in tpl.iter().map(|&v| v as f64).zip(window.iter()) {
                    num += (t - t_mean) * (i - i_mean);
                    var_t += (t - t_mean) * (t - t_mean);
                    var_i += (i - i_mean) * (i - i_mean);
                }
                let expected = num / (var_t * var_i).sqrt();
                let got = surface.get(x, y).unwrap();
                assert!(
                    (got as f64 - expected).abs() < 1e-5,
                    "({x}, {y}): {got} vs {expected}"
                );
            }
        }
    }

    #[test]
    fn flat_window_scores_nan_for_normalised_coefficient() {
        let image = vec![7u8; 16];
        let tpl = pattern(2, 2, 3);
        let image_view = ImageView::from_slice(&image, 4, 4, 1).unwrap();
        let tpl_view = ImageView::from_slice(&tpl, 2, 2, 1).unwrap();
        let plan = TemplatePlan::from_view(tpl_view, None).unwrap();
        let score =
            <ScalarKernel as Kernel>::score_at(image_view, &plan, Algorithm::CCoeffNormed, 1, 1);
        assert!(score.is_nan());
        let sq = <ScalarKernel as Kernel>::score_at(image_view, &plan, Algorithm::SqDiff, 1, 1);
        assert!(sq.is_finite());
    }

    #[test]
    fn scan_rejects_oversized_template() {
        let image = vec![0u8; 9];
        let tpl = vec![0u8; 16];
        let image_view = ImageView::from_slice(&image, 3, 3, 1).unwrap();
        let tpl_view = ImageView::from_slice(&tpl, 4, 4, 1).unwrap();
        let plan = TemplatePlan::from_view(tpl_view, None).unwrap();
        let err = <ScalarKernel as Kernel>::scan_full(image_view, &plan, Algorithm::SqDiff)
            .err()
            .unwrap();
        assert_eq!(
            err,
            ScreenMatchError::TemplateTooLarge {
                tpl_width: 4,
                tpl_height: 4,
                img_width: 3,
                img_height: 3,
            }
        );
    }
}
