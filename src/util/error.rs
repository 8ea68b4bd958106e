//! Error types for screenmatch.

use crate::geometry::Rect;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for screenmatch operations.
pub type ScreenMatchResult<T> = std::result::Result<T, ScreenMatchError>;

/// Errors that abort a matching call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ScreenMatchError {
    /// Width or height is zero, or the pixel count overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than one packed row.
    #[error("stride {stride} is shorter than row length {row_len}")]
    InvalidStride { row_len: usize, stride: usize },
    /// The backing buffer cannot hold the described image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Only 1 to 4 interleaved channels are supported.
    #[error("unsupported channel count {channels}")]
    InvalidChannels { channels: usize },
    /// The region of interest is empty, negative or leaves the image.
    #[error("region {roi:?} is not inside a {img_width}x{img_height} image")]
    InvalidRegion {
        roi: Rect,
        img_width: usize,
        img_height: usize,
    },
    /// The numeric method identifier does not name a known algorithm.
    #[error("unknown matching method code {code}")]
    InvalidMethod { code: i32 },
    /// Template and search image have different channel depths.
    #[error("channel mismatch: image has {expected} channels, template has {got}")]
    ChannelMismatch { expected: usize, got: usize },
    /// The mask does not have one entry per template pixel.
    #[error("mask has {got} entries, template has {expected} pixels")]
    InvalidMask { expected: usize, got: usize },
    /// The template does not fit inside the search region.
    #[error("template {tpl_width}x{tpl_height} exceeds search region {img_width}x{img_height}")]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Decoding or encoding through the `image` crate failed.
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
}

/// Reasons a single template could not be loaded.
///
/// These are recorded per template and never abort a matching call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TemplateLoadError {
    /// The template path does not exist.
    #[error("template file not found: {}", path.display())]
    NotFound { path: PathBuf },
    /// The file exists but could not be decoded.
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    /// An in-memory template does not share the search image channel depth.
    #[error("template has {got} channels, search image has {expected}")]
    ChannelMismatch { expected: usize, got: usize },
    /// Loading from a path needs the `image-io` feature.
    #[error("loading templates from disk requires the `image-io` feature")]
    Unsupported,
}
