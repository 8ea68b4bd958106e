//! Conversion of score surfaces into candidate matches.

use crate::image::roi::Roi;
use crate::kernel::ScoreSurface;
use crate::metric::ScoreDirection;
use crate::result::MatchResult;

/// Fixed pre-filter applied before suppression, independent of user thresholds.
///
/// Higher-is-better scores must be `>= 0.5`, lower-is-better scores `<= 0.5`.
pub const COARSE_PREFILTER: f32 = 0.5;

/// Scans `surface` in row-major order and keeps every finite cell passing
/// [`COARSE_PREFILTER`].
///
/// Each kept cell becomes a box of the template size placed at
/// `(col + roi.x, row + roi.y)`.
pub fn extract_candidates(
    surface: &ScoreSurface,
    direction: ScoreDirection,
    roi: &Roi<'_>,
    tpl_width: usize,
    tpl_height: usize,
    template_index: usize,
) -> Vec<MatchResult> {
    let mut out = Vec::new();
    for row in 0..surface.height() {
        let Some(scores) = surface.row(row) else {
            break;
        };
        for (col, &score) in scores.iter().enumerate() {
            if !score.is_finite() || !direction.passes(score, COARSE_PREFILTER) {
                continue;
            }
            out.push(MatchResult {
                rect: roi.to_image(col, row, tpl_width, tpl_height),
                score,
                template_index,
            });
        }
    }
    out
}
