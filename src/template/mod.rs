//! Template storage, masking and planning utilities.

use crate::image::{ImageView, OwnedImage};
use crate::util::ScreenMatchResult;
use std::fmt;
use std::path::PathBuf;

mod mask;
mod plan;
mod store;

pub use mask::{chroma_key_mask, ChromaKey};
pub use plan::TemplatePlan;
pub use store::{LoadedTemplate, TemplateLoadFailure, TemplateStore};

/// Where a template came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// Loaded from this path.
    Path(PathBuf),
    /// Supplied as an already decoded buffer.
    InMemory,
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Path(path) => write!(f, "{}", path.display()),
            TemplateSource::InMemory => f.write_str("in-memory"),
        }
    }
}

/// A template as declared by the caller, before loading.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateInput {
    Path(PathBuf),
    Image(OwnedImage),
}

impl TemplateInput {
    /// Source identity reported for this input.
    pub fn source(&self) -> TemplateSource {
        match self {
            TemplateInput::Path(path) => TemplateSource::Path(path.clone()),
            TemplateInput::Image(_) => TemplateSource::InMemory,
        }
    }
}

impl From<PathBuf> for TemplateInput {
    fn from(path: PathBuf) -> Self {
        TemplateInput::Path(path)
    }
}

impl From<&str> for TemplateInput {
    fn from(path: &str) -> Self {
        TemplateInput::Path(PathBuf::from(path))
    }
}

impl From<OwnedImage> for TemplateInput {
    fn from(img: OwnedImage) -> Self {
        TemplateInput::Image(img)
    }
}

/// Immutable decoded template image with its source identity.
#[derive(Clone, Debug)]
pub struct Template {
    img: OwnedImage,
    source: TemplateSource,
}

impl Template {
    /// Creates an in-memory template from a packed interleaved buffer.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> ScreenMatchResult<Self> {
        let img = OwnedImage::new(data, width, height, channels)?;
        Ok(Self {
            img,
            source: TemplateSource::InMemory,
        })
    }

    /// Wraps an owned image with an explicit source.
    pub fn from_image(img: OwnedImage, source: TemplateSource) -> Self {
        Self { img, source }
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    pub fn channels(&self) -> usize {
        self.img.channels()
    }
}
