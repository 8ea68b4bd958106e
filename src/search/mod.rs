//! Multi-template search and result aggregation.
//!
//! For each template in declaration order: correlate over the search region,
//! extract candidates, suppress them per template (IoU 0.7) and apply that
//! template's threshold. Afterwards the accepted candidates of all templates
//! are suppressed together (IoU 0.5), both lists are ordered, and the best
//! result is selected from the ordered accepted list.

use crate::candidate::{
    extract_candidates, nms_iou, select_index, sort_results, OrderBy, GLOBAL_IOU_CUTOFF,
    PER_TEMPLATE_IOU_CUTOFF,
};
use crate::geometry::Rect;
use crate::image::roi::{extract_roi, Roi};
use crate::image::{ImageView, OwnedImage};
use crate::kernel::correlate;
use crate::metric::Method;
use crate::result::{MatchResult, RecoResult, TEMPLATE_MATCH_ALGORITHM};
use crate::template::{
    chroma_key_mask, ChromaKey, LoadedTemplate, TemplateInput, TemplatePlan, TemplateStore,
};
use crate::trace::{trace_event, trace_span};
use crate::util::ScreenMatchResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::time::Instant;

/// Threshold used when no thresholds are configured.
pub const DEFAULT_THRESHOLD: f32 = 0.7;

/// Configuration of one matching run.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchParameters {
    /// Templates in declaration order.
    pub templates: Vec<TemplateInput>,
    /// Per-template thresholds; the last one repeats for extra templates.
    pub thresholds: Vec<f32>,
    /// Correlation algorithm and inverted flag.
    pub method: Method,
    /// Exclude chroma-key pixels of each template from scoring.
    pub green_mask: bool,
    /// Colour treated as transparent when `green_mask` is set.
    pub chroma_key: ChromaKey,
    /// Ordering applied to both result lists before selection.
    pub order_by: OrderBy,
    /// Index into the ordered accepted results; negative counts from the end.
    pub result_index: isize,
    /// Fan templates and surface rows out over rayon (feature `rayon`).
    pub parallel: bool,
    /// Render an annotated copy of the image (feature `image-io`).
    pub debug_draw: bool,
}

impl Default for MatchParameters {
    fn default() -> Self {
        Self {
            templates: Vec::new(),
            thresholds: Vec::new(),
            method: Method::default(),
            green_mask: false,
            chroma_key: ChromaKey::default(),
            order_by: OrderBy::default(),
            result_index: 0,
            parallel: false,
            debug_draw: false,
        }
    }
}

impl MatchParameters {
    /// Threshold for the template declared at `index`.
    ///
    /// Falls back to the last configured threshold, then to
    /// [`DEFAULT_THRESHOLD`].
    pub fn threshold_for(&self, index: usize) -> f32 {
        self.thresholds
            .get(index)
            .or(self.thresholds.last())
            .copied()
            .unwrap_or(DEFAULT_THRESHOLD)
    }
}

#[derive(Default)]
struct TemplateMatches {
    raw: Vec<MatchResult>,
    accepted: Vec<MatchResult>,
}

/// Stateless multi-template matcher.
#[derive(Clone, Debug)]
pub struct TemplateMatcher {
    params: MatchParameters,
}

impl TemplateMatcher {
    pub fn new(params: MatchParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MatchParameters {
        &self.params
    }

    /// Searches `image` (restricted to `roi`, if any) for every template.
    ///
    /// Fails only on invalid input such as a region outside the image.
    /// Template load failures are reported in the result and skipped.
    pub fn analyze(
        &self,
        image: ImageView<'_, u8>,
        roi: Option<Rect>,
    ) -> ScreenMatchResult<RecoResult> {
        let start = Instant::now();
        let _span = trace_span!("analyze", templates = self.params.templates.len()).entered();

        let region = extract_roi(image, roi)?;
        let store = TemplateStore::load(&self.params.templates, image.channels());
        let mut result = RecoResult::new(TEMPLATE_MATCH_ALGORITHM);
        if store.is_empty() {
            result.load_failures = store.into_failures();
            result.cost_ms = elapsed_ms(start);
            return Ok(result);
        }

        let direction = self.params.method.direction();
        let mut all_results = Vec::new();
        let mut accepted = Vec::new();
        for matches in self.match_templates(&region, store.templates())? {
            all_results.extend(matches.raw);
            accepted.extend(matches.accepted);
        }

        let mut filtered = nms_iou(&accepted, direction, GLOBAL_IOU_CUTOFF);
        sort_results(&mut all_results, self.params.order_by, direction);
        sort_results(&mut filtered, self.params.order_by, direction);
        result.best_result = select_index(&filtered, self.params.result_index).copied();

        if self.params.debug_draw && result.best_result.is_some() {
            result.debug_image = render_debug(image, region.rect(), &filtered)?;
        }

        result.all_results = all_results;
        result.filtered_results = filtered;
        result.load_failures = store.into_failures();
        result.cost_ms = elapsed_ms(start);
        trace_event!(
            "analyze_done",
            all = result.all_results.len(),
            filtered = result.filtered_results.len(),
            found = result.best_result.is_some(),
            cost_ms = result.cost_ms
        );
        Ok(result)
    }

    #[cfg(feature = "rayon")]
    fn match_templates(
        &self,
        region: &Roi<'_>,
        templates: &[LoadedTemplate],
    ) -> ScreenMatchResult<Vec<TemplateMatches>> {
        if self.params.parallel {
            templates
                .par_iter()
                .map(|loaded| self.match_template(region, loaded))
                .collect()
        } else {
            templates
                .iter()
                .map(|loaded| self.match_template(region, loaded))
                .collect()
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn match_templates(
        &self,
        region: &Roi<'_>,
        templates: &[LoadedTemplate],
    ) -> ScreenMatchResult<Vec<TemplateMatches>> {
        templates
            .iter()
            .map(|loaded| self.match_template(region, loaded))
            .collect()
    }

    fn match_template(
        &self,
        region: &Roi<'_>,
        loaded: &LoadedTemplate,
    ) -> ScreenMatchResult<TemplateMatches> {
        let template = loaded.template();
        let index = loaded.index();
        let direction = self.params.method.direction();

        let mask = if self.params.green_mask {
            chroma_key_mask(template.view(), self.params.chroma_key)
        } else {
            None
        };
        let plan = TemplatePlan::from_view(template.view(), mask)?;
        let Some(surface) = correlate(region.view(), &plan, self.params.method, self.params.parallel)?
        else {
            return Ok(TemplateMatches::default());
        };

        let candidates = extract_candidates(
            &surface,
            direction,
            region,
            template.width(),
            template.height(),
            index,
        );
        let raw = nms_iou(&candidates, direction, PER_TEMPLATE_IOU_CUTOFF);
        let threshold = self.params.threshold_for(index);
        let accepted: Vec<MatchResult> = raw
            .iter()
            .copied()
            .filter(|m| direction.passes(m.score, threshold))
            .collect();

        trace_event!(
            "template_matched",
            index = index,
            candidates = candidates.len(),
            raw = raw.len(),
            accepted = accepted.len()
        );
        Ok(TemplateMatches { raw, accepted })
    }
}

/// Single-template convenience search.
pub fn find_template(
    image: ImageView<'_, u8>,
    template: impl Into<TemplateInput>,
    threshold: f32,
    roi: Option<Rect>,
    method: Method,
) -> ScreenMatchResult<RecoResult> {
    let params = MatchParameters {
        templates: vec![template.into()],
        thresholds: vec![threshold],
        method,
        ..MatchParameters::default()
    };
    TemplateMatcher::new(params).analyze(image, roi)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(feature = "image-io")]
fn render_debug(
    image: ImageView<'_, u8>,
    roi: Rect,
    results: &[MatchResult],
) -> ScreenMatchResult<Option<OwnedImage>> {
    crate::debug::render_matches(image, roi, results).map(Some)
}

#[cfg(not(feature = "image-io"))]
fn render_debug(
    _image: ImageView<'_, u8>,
    _roi: Rect,
    _results: &[MatchResult],
) -> ScreenMatchResult<Option<OwnedImage>> {
    Ok(None)
}
