//! Candidate extraction, pruning and ordering.
//!
//! Surface cells become candidates, overlapping candidates are suppressed by
//! IoU, and survivors are ordered and selected deterministically.

pub mod extract;
pub mod nms;
pub mod order;

pub use extract::{extract_candidates, COARSE_PREFILTER};
pub use nms::{nms_iou, GLOBAL_IOU_CUTOFF, PER_TEMPLATE_IOU_CUTOFF};
pub use order::{select_index, sort_results, OrderBy};
