// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The region domain error.

use core::fmt;

/// Error raised when region input or an operation's parameters are invalid.
///
/// Errors are raised eagerly at construction boundaries, so a value that was
/// built successfully always satisfies its canonical-form invariants.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionError {
    /// Span boundaries are not an even-length sequence of numbers.
    ///
    /// `index` names the first offending boundary (a NaN), or is `None` when
    /// the sequence has an odd length.
    MalformedSpans {
        /// Number of boundaries supplied.
        len: usize,
        /// Offending boundary, if a specific one is to blame.
        index: Option<usize>,
    },
    /// Span boundaries are not strictly increasing.
    NonMonotonic {
        /// Index of the first boundary that is not greater than its predecessor.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// A transform scale was zero or not finite.
    InvalidScale {
        /// The rejected ratio.
        ratio: f64,
    },
    /// A transform offset was not finite.
    InvalidOffset {
        /// The rejected delta.
        delta: f64,
    },
    /// A rectangle had zero or negative width or height.
    InvalidRect {
        /// Minimum x of the normalized input.
        min_x: f64,
        /// Minimum y of the normalized input.
        min_y: f64,
        /// Maximum x of the normalized input.
        max_x: f64,
        /// Maximum y of the normalized input.
        max_y: f64,
    },
    /// A raw band was empty, inverted, or overlapped its predecessor.
    InvalidBand {
        /// Index of the offending band.
        index: usize,
    },
    /// A transform carried a finite boundary past the range of `f64`.
    Overflow {
        /// The boundary before the transform.
        value: f64,
    },
    /// Contour tracing found no edge to follow.
    ///
    /// This cannot happen for regions built by this crate; it signals an
    /// engine bug.
    ContourTrace {
        /// X coordinate of the dangling vertex.
        x: f64,
        /// Y coordinate of the dangling vertex.
        y: f64,
    },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSpans { len, index: None } => write!(
                f,
                "expected an ordered array of numeric start/end pairs, got {len} boundaries"
            ),
            Self::MalformedSpans {
                len,
                index: Some(index),
            } => write!(
                f,
                "expected an ordered array of numeric start/end pairs, boundary {index} of {len} is not a number"
            ),
            Self::NonMonotonic { index, value } => write!(
                f,
                "span boundaries are not in strictly ascending order at index {index} (value {value})"
            ),
            Self::InvalidScale { ratio } => write!(f, "invalid scale ratio {ratio}"),
            Self::InvalidOffset { delta } => write!(f, "invalid translation delta {delta}"),
            Self::InvalidRect {
                min_x,
                min_y,
                max_x,
                max_y,
            } => write!(
                f,
                "cannot construct a region from a rectangle of zero or negative size \
                 ({min_x}, {min_y}) - ({max_x}, {max_y})"
            ),
            Self::InvalidBand { index } => write!(f, "invalid band data for band {index}"),
            Self::Overflow { value } => {
                write!(f, "transform maps boundary {value} outside the finite range")
            }
            Self::ContourTrace { x, y } => {
                write!(f, "contour tracing found no edge leaving ({x}, {y})")
            }
        }
    }
}

impl core::error::Error for RegionError {}
