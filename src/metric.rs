//! Correlation algorithms, the inverted flag and score direction.
//!
//! Legacy callers identify a method with a single integer: an OpenCV-style
//! algorithm code in `0..=5`, plus [`METHOD_INVERT_BASE`] to request
//! `1 - score` remapping. That code is decoded once into a [`Method`] and never
//! re-parsed downstream.

use crate::util::{ScreenMatchError, ScreenMatchResult};
use std::cmp::Ordering;

/// Offset added to an algorithm code to request inverted scores.
pub const METHOD_INVERT_BASE: i32 = 10_000;

/// Dense correlation algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Sum of squared differences.
    SqDiff,
    /// Sum of squared differences normalised by both energies.
    SqDiffNormed,
    /// Raw cross-correlation.
    CCorr,
    /// Cross-correlation normalised by both energies.
    CCorrNormed,
    /// Cross-correlation of mean-subtracted signals.
    CCoeff,
    /// Zero-mean normalised cross-correlation.
    #[default]
    CCoeffNormed,
}

impl Algorithm {
    /// All algorithms in code order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::SqDiff,
        Algorithm::SqDiffNormed,
        Algorithm::CCorr,
        Algorithm::CCorrNormed,
        Algorithm::CCoeff,
        Algorithm::CCoeffNormed,
    ];

    /// Decodes an OpenCV-compatible algorithm code.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// OpenCV-compatible algorithm code.
    pub fn code(self) -> i32 {
        match self {
            Algorithm::SqDiff => 0,
            Algorithm::SqDiffNormed => 1,
            Algorithm::CCorr => 2,
            Algorithm::CCorrNormed => 3,
            Algorithm::CCoeff => 4,
            Algorithm::CCoeffNormed => 5,
        }
    }

    /// True for the squared-difference family.
    pub fn lower_is_better(self) -> bool {
        matches!(self, Algorithm::SqDiff | Algorithm::SqDiffNormed)
    }

    /// Short snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::SqDiff => "sqdiff",
            Algorithm::SqDiffNormed => "sqdiff_normed",
            Algorithm::CCorr => "ccorr",
            Algorithm::CCorrNormed => "ccorr_normed",
            Algorithm::CCoeff => "ccoeff",
            Algorithm::CCoeffNormed => "ccoeff_normed",
        }
    }
}

/// Which end of the score range wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreDirection {
    HigherIsBetter,
    LowerIsBetter,
}

impl ScoreDirection {
    /// True when `a` is strictly better than `b`.
    pub fn is_better(self, a: f32, b: f32) -> bool {
        self.cmp_best_first(a, b) == Ordering::Less
    }

    /// Acceptance test against a user threshold (inclusive).
    pub fn passes(self, score: f32, threshold: f32) -> bool {
        match self {
            ScoreDirection::HigherIsBetter => score >= threshold,
            ScoreDirection::LowerIsBetter => score <= threshold,
        }
    }

    /// Orders scores best-first; usable directly with `sort_by`.
    pub fn cmp_best_first(self, a: f32, b: f32) -> Ordering {
        match self {
            ScoreDirection::HigherIsBetter => b.total_cmp(&a),
            ScoreDirection::LowerIsBetter => a.total_cmp(&b),
        }
    }
}

/// A decoded matching method: algorithm plus inverted flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Method {
    pub algorithm: Algorithm,
    /// Remap every score `s` to `1 - s` after correlation.
    pub inverted: bool,
}

impl Method {
    /// Non-inverted method.
    pub const fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            inverted: false,
        }
    }

    /// Inverted method.
    pub const fn inverted(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            inverted: true,
        }
    }

    /// Decodes a legacy numeric identifier (`code` or `code + 10000`).
    pub fn from_code(code: i32) -> ScreenMatchResult<Self> {
        let (base, inverted) = if code >= METHOD_INVERT_BASE {
            (code - METHOD_INVERT_BASE, true)
        } else {
            (code, false)
        };
        let algorithm = Algorithm::from_code(base).ok_or(ScreenMatchError::InvalidMethod { code })?;
        Ok(Self {
            algorithm,
            inverted,
        })
    }

    /// Encodes back into the legacy numeric identifier.
    pub fn code(self) -> i32 {
        let base = self.algorithm.code();
        if self.inverted {
            base + METHOD_INVERT_BASE
        } else {
            base
        }
    }

    /// Score direction of the values this method produces.
    ///
    /// Only the non-inverted squared-difference algorithms are
    /// lower-is-better; every inverted method is higher-is-better.
    pub fn direction(self) -> ScoreDirection {
        if !self.inverted && self.algorithm.lower_is_better() {
            ScoreDirection::LowerIsBetter
        } else {
            ScoreDirection::HigherIsBetter
        }
    }
}
