//! Low-level building blocks for custom matching pipelines.
//!
//! These expose template plans, kernels, candidate extraction and
//! suppression for callers that want to drive the stages themselves. Most
//! users should prefer [`TemplateMatcher`](crate::TemplateMatcher).

pub use crate::candidate::{
    extract_candidates, nms_iou, select_index, sort_results, COARSE_PREFILTER, GLOBAL_IOU_CUTOFF,
    PER_TEMPLATE_IOU_CUTOFF,
};
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::RowParallelKernel;
pub use crate::kernel::scalar::ScalarKernel;
pub use crate::kernel::{correlate, Kernel, ScoreSurface};
pub use crate::image::roi::{extract_roi, Roi};
pub use crate::template::{chroma_key_mask, LoadedTemplate, TemplatePlan, TemplateStore};
