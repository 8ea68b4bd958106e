//! ScreenMatch locates small reference images (templates) inside a larger
//! search image.
//!
//! A [`TemplateMatcher`] correlates every template over an optional region of
//! interest with one of six correlation methods, extracts candidate boxes,
//! suppresses overlapping ones, applies per-template thresholds and returns a
//! [`RecoResult`] with the selected best match. Row-parallel scans are
//! available via the `rayon` feature; file loading and debug rendering via the
//! `image-io` feature.

mod trace;

pub mod candidate;
#[cfg(feature = "image-io")]
pub mod debug;
pub mod geometry;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod metric;
pub mod result;
pub mod search;
pub mod template;
pub mod util;

pub use candidate::OrderBy;
pub use geometry::Rect;
pub use crate::image::{ImageView, OwnedImage};
pub use metric::{Algorithm, Method, ScoreDirection, METHOD_INVERT_BASE};
pub use result::{MatchResult, RecoResult, TEMPLATE_MATCH_ALGORITHM};
pub use search::{find_template, MatchParameters, TemplateMatcher, DEFAULT_THRESHOLD};
pub use template::{ChromaKey, Template, TemplateInput, TemplateLoadFailure, TemplateSource};
pub use util::{ScreenMatchError, ScreenMatchResult, TemplateLoadError};

#[cfg(feature = "image-io")]
pub use crate::image::io;
