//! Template loading for one matching run.
//!
//! Every declared template is loaded independently. A failure is recorded
//! with the template's declaration index and the remaining templates are
//! still loaded.

use crate::image::OwnedImage;
use crate::template::{Template, TemplateInput, TemplateSource};
use crate::trace::{trace_event, trace_warn};
use crate::util::TemplateLoadError;
use std::path::Path;

/// A successfully loaded template and its declaration index.
#[derive(Clone, Debug)]
pub struct LoadedTemplate {
    index: usize,
    template: Template,
}

impl LoadedTemplate {
    /// Position of the template in the caller's declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// A template that could not be loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateLoadFailure {
    /// Position of the template in the caller's declaration order.
    pub index: usize,
    pub source: TemplateSource,
    pub error: TemplateLoadError,
}

/// Templates owned for the duration of one matching run.
#[derive(Clone, Debug, Default)]
pub struct TemplateStore {
    templates: Vec<LoadedTemplate>,
    failures: Vec<TemplateLoadFailure>,
}

impl TemplateStore {
    /// Loads every input at the channel depth of the search image.
    ///
    /// Path templates are converted to `channels`; in-memory templates must
    /// already have that depth.
    pub fn load(inputs: &[TemplateInput], channels: usize) -> Self {
        let mut store = Self::default();
        for (index, input) in inputs.iter().enumerate() {
            match load_one(input, channels) {
                Ok(template) => {
                    trace_event!(
                        "template_loaded",
                        index = index,
                        source = template.source().to_string(),
                        width = template.width(),
                        height = template.height()
                    );
                    store.templates.push(LoadedTemplate { index, template });
                }
                Err(error) => {
                    trace_warn!(
                        "template_load_failed",
                        index = index,
                        source = input.source().to_string(),
                        error = error.to_string()
                    );
                    store.failures.push(TemplateLoadFailure {
                        index,
                        source: input.source(),
                        error,
                    });
                }
            }
        }
        store
    }

    /// Loaded templates in declaration order.
    pub fn templates(&self) -> &[LoadedTemplate] {
        &self.templates
    }

    /// Failed templates in declaration order.
    pub fn failures(&self) -> &[TemplateLoadFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<TemplateLoadFailure> {
        self.failures
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn load_one(input: &TemplateInput, channels: usize) -> Result<Template, TemplateLoadError> {
    match input {
        TemplateInput::Path(path) => {
            let img = load_path(path, channels)?;
            Ok(Template::from_image(img, TemplateSource::Path(path.clone())))
        }
        TemplateInput::Image(img) => {
            if img.channels() != channels {
                return Err(TemplateLoadError::ChannelMismatch {
                    expected: channels,
                    got: img.channels(),
                });
            }
            Ok(Template::from_image(img.clone(), TemplateSource::InMemory))
        }
    }
}

#[cfg(feature = "image-io")]
fn load_path(path: &Path, channels: usize) -> Result<OwnedImage, TemplateLoadError> {
    use crate::util::ScreenMatchError;

    if !path.exists() {
        return Err(TemplateLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    crate::image::io::load_image(path, channels).map_err(|err| TemplateLoadError::Decode {
        path: path.to_path_buf(),
        reason: match err {
            ScreenMatchError::ImageIo { reason } => reason,
            other => other.to_string(),
        },
    })
}

#[cfg(not(feature = "image-io"))]
fn load_path(_path: &Path, _channels: usize) -> Result<OwnedImage, TemplateLoadError> {
    Err(TemplateLoadError::Unsupported)
}
