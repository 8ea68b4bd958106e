//! Match records and the aggregate recognition result.

use crate::geometry::Rect;
use crate::image::OwnedImage;
use crate::template::TemplateLoadFailure;

/// Algorithm name reported by the template matcher.
pub const TEMPLATE_MATCH_ALGORITHM: &str = "TemplateMatch";

/// One detection in image coordinates.
///
/// Score direction depends on the method; compare scores through
/// [`ScoreDirection`](crate::ScoreDirection), never with a raw `>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// Matched box; its size is the template size.
    pub rect: Rect,
    pub score: f32,
    /// Declaration index of the template that produced this match.
    pub template_index: usize,
}

/// Aggregate output of one `analyze()` call.
#[derive(Clone, Debug, PartialEq)]
pub struct RecoResult {
    pub algorithm: &'static str,
    /// Entry of `filtered_results` picked by the result index.
    pub best_result: Option<MatchResult>,
    /// Candidates after per-template suppression, before thresholding, ordered.
    pub all_results: Vec<MatchResult>,
    /// Accepted candidates after global suppression, ordered.
    pub filtered_results: Vec<MatchResult>,
    /// Wall-clock time of the whole call in milliseconds.
    pub cost_ms: f64,
    /// Templates that could not be loaded and were skipped.
    pub load_failures: Vec<TemplateLoadFailure>,
    /// Annotated copy of the search image, when requested.
    pub debug_image: Option<OwnedImage>,
}

impl RecoResult {
    /// Empty result for `algorithm`.
    pub fn new(algorithm: &'static str) -> Self {
        Self {
            algorithm,
            best_result: None,
            all_results: Vec::new(),
            filtered_results: Vec::new(),
            cost_ms: 0.0,
            load_failures: Vec::new(),
            debug_image: None,
        }
    }

    /// True when a best result was selected.
    pub fn success(&self) -> bool {
        self.best_result.is_some()
    }
}
