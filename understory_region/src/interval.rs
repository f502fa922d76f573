// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical one-dimensional interval sets.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{BitAnd, BitOr, BitXor, Not, Sub};

use kurbo::Rect;

use crate::error::RegionError;
use crate::sweep;
use crate::types::{Relation, SetOp};

/// A set of points on the number line, stored as sorted half-open spans.
///
/// The boundaries `[s0, e0, s1, e1, ...]` are strictly increasing, so spans
/// never touch or overlap and the representation is unique. The first and last
/// boundary may be `-inf` / `+inf` for unbounded sets.
///
/// Values are immutable; clones share storage. Every operation returns a new
/// set in O(n + m) time.
///
/// ```
/// use understory_region::IntervalSet;
///
/// let a = IntervalSet::new(0.0, 10.0)?;
/// let b = IntervalSet::new(3.0, 7.0)?;
/// assert_eq!(a.subtract(&b).spans(), &[0.0, 3.0, 7.0, 10.0]);
/// assert!(a.is_point_in(9.5));
/// assert!(!a.is_point_in(10.0));
/// # Ok::<(), understory_region::RegionError>(())
/// ```
#[derive(Clone)]
pub struct IntervalSet {
    spans: Arc<[f64]>,
    checksum: i32,
}

impl IntervalSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self {
            spans: Arc::from([]),
            checksum: 0,
        }
    }

    /// The whole number line, `[-inf, +inf)`.
    pub fn infinite() -> Self {
        Self::from_trusted(alloc::vec![f64::NEG_INFINITY, f64::INFINITY])
    }

    /// A set holding the single span `[start, end)`.
    pub fn new(start: f64, end: f64) -> Result<Self, RegionError> {
        Self::from_spans(&[start, end])
    }

    /// Build a set from raw boundaries, validating them.
    ///
    /// The boundaries must be an even-length, strictly increasing sequence of
    /// numbers (infinities allowed, NaN rejected).
    pub fn from_spans(spans: &[f64]) -> Result<Self, RegionError> {
        validate(spans)?;
        Ok(Self::from_trusted(spans.to_vec()))
    }

    /// Wrap boundaries already known to be canonical.
    pub(crate) fn from_trusted(spans: Vec<f64>) -> Self {
        debug_assert!(validate(&spans).is_ok(), "non-canonical spans {spans:?}");
        let checksum = checksum_of(&spans);
        Self {
            spans: Arc::from(spans),
            checksum,
        }
    }

    /// The raw boundaries.
    pub fn spans(&self) -> &[f64] {
        &self.spans
    }

    /// A copy of the raw boundaries, suitable for [`IntervalSet::from_spans`].
    pub fn raw_spans(&self) -> Vec<f64> {
        self.spans.to_vec()
    }

    /// Iterate the spans as `(start, end)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.spans.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// True if the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of spans.
    pub fn count(&self) -> usize {
        self.spans.len() / 2
    }

    /// Content checksum; equal sets always have equal checksums.
    pub fn checksum(&self) -> i32 {
        self.checksum
    }

    /// Smallest boundary, or `+inf` when empty.
    pub(crate) fn min(&self) -> f64 {
        self.spans.first().copied().unwrap_or(f64::INFINITY)
    }

    /// Largest boundary, or `-inf` when empty.
    pub(crate) fn max(&self) -> f64 {
        self.spans.last().copied().unwrap_or(f64::NEG_INFINITY)
    }

    /// The `(min, max)` extent, or `None` for the empty set.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((*self.spans.first()?, *self.spans.last()?))
    }

    /// Apply a Boolean operator in one merged sweep.
    pub fn combine(&self, other: &Self, op: SetOp) -> Self {
        Self::from_trusted(sweep::combine(&self.spans, &other.spans, op))
    }

    /// Points in either set.
    pub fn union(&self, other: &Self) -> Self {
        self.combine(other, SetOp::Union)
    }

    /// Points in both sets.
    pub fn intersect(&self, other: &Self) -> Self {
        self.combine(other, SetOp::Intersect)
    }

    /// Points in `self` but not in `other`.
    pub fn subtract(&self, other: &Self) -> Self {
        self.combine(other, SetOp::Subtract)
    }

    /// Points in exactly one of the sets.
    pub fn xor(&self, other: &Self) -> Self {
        self.combine(other, SetOp::Xor)
    }

    /// Every point not in the set, including the infinities.
    pub fn complement(&self) -> Self {
        Self::from_trusted(sweep::complement(&self.spans))
    }

    /// Whether `x` lies in some span `[s, e)`.
    pub fn is_point_in(&self, x: f64) -> bool {
        sweep::contains(&self.spans, x)
    }

    /// Classify how the two sets overlap.
    pub fn relate(&self, other: &Self) -> Relation {
        sweep::relate(&self.spans, &other.spans, false)
    }

    /// Whether the sets share any point; stops at the first overlap found.
    pub fn does_intersect(&self, other: &Self) -> bool {
        sweep::intersects(&self.spans, &other.spans)
    }

    /// Map every boundary `v` to `v * ratio + delta`.
    ///
    /// `ratio` must be finite and nonzero and `delta` finite. The result is
    /// validated again: rounding can collapse neighboring boundaries and a
    /// negative ratio reverses them, both of which are rejected as
    /// [`RegionError::NonMonotonic`]. Infinite boundaries stay infinite; a
    /// finite boundary that overflows is [`RegionError::Overflow`].
    pub fn transform(&self, ratio: f64, delta: f64) -> Result<Self, RegionError> {
        check_transform(ratio, delta)?;
        let mapped = self
            .spans
            .iter()
            .map(|&v| map_boundary(v, ratio, delta))
            .collect::<Result<Vec<f64>, _>>()?;
        validate(&mapped)?;
        Ok(Self::from_trusted(mapped))
    }

    /// Shift every boundary by `delta`.
    pub fn translate(&self, delta: f64) -> Result<Self, RegionError> {
        self.transform(1.0, delta)
    }

    /// Multiply every boundary by `ratio`.
    pub fn scale(&self, ratio: f64) -> Result<Self, RegionError> {
        self.transform(ratio, 0.0)
    }

    /// The spans as rectangles covering `[min_y, max_y)`.
    pub fn as_rects(&self, min_y: f64, max_y: f64) -> Vec<Rect> {
        let mut out = Vec::with_capacity(self.count());
        self.extend_rects(min_y, max_y, &mut out);
        out
    }

    pub(crate) fn extend_rects(&self, min_y: f64, max_y: f64, out: &mut Vec<Rect>) {
        out.extend(self.iter().map(|(x0, x1)| Rect::new(x0, min_y, x1, max_y)));
    }

    /// Whether both values share storage.
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.spans, &other.spans)
    }
}

impl Default for IntervalSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for IntervalSet {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.checksum != other.checksum {
            return false;
        }
        self.spans[..] == other.spans[..]
    }
}

impl fmt::Debug for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalSet")
            .field("spans", &&self.spans[..])
            .field("checksum", &self.checksum)
            .finish()
    }
}

impl BitOr for &IntervalSet {
    type Output = IntervalSet;

    fn bitor(self, rhs: Self) -> IntervalSet {
        self.union(rhs)
    }
}

impl BitAnd for &IntervalSet {
    type Output = IntervalSet;

    fn bitand(self, rhs: Self) -> IntervalSet {
        self.intersect(rhs)
    }
}

impl BitXor for &IntervalSet {
    type Output = IntervalSet;

    fn bitxor(self, rhs: Self) -> IntervalSet {
        self.xor(rhs)
    }
}

impl Sub for &IntervalSet {
    type Output = IntervalSet;

    fn sub(self, rhs: Self) -> IntervalSet {
        self.subtract(rhs)
    }
}

impl Not for &IntervalSet {
    type Output = IntervalSet;

    fn not(self) -> IntervalSet {
        self.complement()
    }
}

/// Check that boundaries are an even-length, strictly increasing run of numbers.
pub(crate) fn validate(spans: &[f64]) -> Result<(), RegionError> {
    let len = spans.len();
    if len & 1 != 0 {
        return Err(RegionError::MalformedSpans { len, index: None });
    }
    if let Some(index) = spans.iter().position(|v| v.is_nan()) {
        return Err(RegionError::MalformedSpans {
            len,
            index: Some(index),
        });
    }
    for (i, pair) in spans.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(RegionError::NonMonotonic {
                index: i + 1,
                value: pair[1],
            });
        }
    }
    Ok(())
}

/// Reject scale ratios that are zero or not finite, and offsets that are not finite.
pub(crate) fn check_transform(ratio: f64, delta: f64) -> Result<(), RegionError> {
    if !delta.is_finite() {
        return Err(RegionError::InvalidOffset { delta });
    }
    if !ratio.is_finite() || ratio == 0.0 {
        return Err(RegionError::InvalidScale { ratio });
    }
    Ok(())
}

/// Map one boundary, keeping finite values finite.
pub(crate) fn map_boundary(value: f64, ratio: f64, delta: f64) -> Result<f64, RegionError> {
    let mapped = value * ratio + delta;
    if value.is_finite() && !mapped.is_finite() {
        return Err(RegionError::Overflow { value });
    }
    Ok(mapped)
}

/// Fold one value into a running checksum.
///
/// Values contribute their integer part modulo 2^32; non-finite values
/// contribute nothing.
#[inline]
pub(crate) fn fold_checksum(hash: i32, value: i32) -> i32 {
    hash.wrapping_mul(23).wrapping_add(value)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Checksums keep only the low 32 bits of each boundary's integer part."
)]
fn boundary_bits(v: f64) -> i32 {
    if v.is_finite() { v as i64 as i32 } else { 0 }
}

fn checksum_of(spans: &[f64]) -> i32 {
    spans
        .iter()
        .fold(0, |hash, &v| fold_checksum(hash, boundary_bits(v)))
}
