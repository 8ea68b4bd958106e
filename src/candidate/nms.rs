//! Non-maximum suppression by intersection over union.

use crate::metric::ScoreDirection;
use crate::result::MatchResult;

/// IoU cutoff for suppressing one template's raw candidates.
pub const PER_TEMPLATE_IOU_CUTOFF: f32 = 0.7;

/// IoU cutoff for suppressing accepted candidates across templates.
pub const GLOBAL_IOU_CUTOFF: f32 = 0.5;

/// Greedy IoU suppression.
///
/// Candidates are stably sorted best-first, so equal scores keep their input
/// order, and a candidate is kept if its IoU with every already kept candidate
/// is below `iou_cutoff`. The result is in best-first order.
pub fn nms_iou(
    candidates: &[MatchResult],
    direction: ScoreDirection,
    iou_cutoff: f32,
) -> Vec<MatchResult> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| direction.cmp_best_first(a.score, b.score));

    let mut kept: Vec<MatchResult> = Vec::new();
    'outer: for cand in sorted {
        for kept_cand in kept.iter() {
            if cand.rect.iou(&kept_cand.rect) >= iou_cutoff {
                continue 'outer;
            }
        }
        kept.push(cand);
    }

    kept
}
