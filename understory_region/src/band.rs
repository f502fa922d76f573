// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal bands and the outer (Y) sweep that pairs them up.

use crate::interval::IntervalSet;

/// A horizontal strip `[min_y, max_y)` and its horizontal coverage.
///
/// This is the unit of [`Region::raw_bands`](crate::Region::raw_bands) and
/// [`Region::from_raw_bands`](crate::Region::from_raw_bands). Inside a region,
/// bands are sorted, non-overlapping, never empty, and Y-contiguous neighbors
/// never carry equal spans.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    /// Top edge (inclusive).
    pub min_y: f64,
    /// Bottom edge (exclusive).
    pub max_y: f64,
    /// Horizontal coverage of every row in the band.
    pub spans: IntervalSet,
}

impl Band {
    /// Create a band.
    pub fn new(min_y: f64, max_y: f64, spans: IntervalSet) -> Self {
        Self {
            min_y,
            max_y,
            spans,
        }
    }
}

/// One step of the outer sweep: a Y-slice and the rows active on each side.
///
/// A side with no band in the slice contributes an empty span slice.
#[derive(Copy, Clone, Debug)]
pub(crate) struct BandSlice<'a> {
    pub(crate) min_y: f64,
    pub(crate) max_y: f64,
    pub(crate) a: &'a [f64],
    pub(crate) b: &'a [f64],
}

/// Walks the Y-partitions of two band lists together.
///
/// Yields slices that cover the union of both Y-extents without gaps or
/// overlaps between yielded slices. Each side advances independently and is
/// never rescanned, so a full walk is O(n + m).
#[derive(Clone, Debug)]
pub(crate) struct BandPairs<'a> {
    a: &'a [Band],
    b: &'a [Band],
    ia: usize,
    ib: usize,
    /// Bottom of the last yielded slice; later slices start no higher.
    swept_to: f64,
}

impl<'a> BandPairs<'a> {
    pub(crate) fn new(a: &'a [Band], b: &'a [Band]) -> Self {
        Self {
            a,
            b,
            ia: 0,
            ib: 0,
            swept_to: f64::NEG_INFINITY,
        }
    }

    fn emit(&mut self, min_y: f64, max_y: f64, a: &'a [f64], b: &'a [f64]) -> BandSlice<'a> {
        self.swept_to = max_y;
        BandSlice { min_y, max_y, a, b }
    }
}

impl<'a> Iterator for BandPairs<'a> {
    type Item = BandSlice<'a>;

    fn next(&mut self) -> Option<BandSlice<'a>> {
        let (bands_a, bands_b) = (self.a, self.b);
        let (a, b) = match (bands_a.get(self.ia), bands_b.get(self.ib)) {
            (None, None) => return None,
            (None, Some(rb)) => {
                self.ib += 1;
                let top = rb.min_y.max(self.swept_to);
                return Some(self.emit(top, rb.max_y, &[], rb.spans.spans()));
            }
            (Some(ra), None) => {
                self.ia += 1;
                let top = ra.min_y.max(self.swept_to);
                return Some(self.emit(top, ra.max_y, ra.spans.spans(), &[]));
            }
            (Some(ra), Some(rb)) => (ra, rb),
        };

        let top_a = a.min_y.max(self.swept_to);
        let top_b = b.min_y.max(self.swept_to);

        if top_a == top_b {
            // Shared top edge: run to the nearer bottom and consume whichever
            // side(s) end there.
            let bottom = if b.max_y < a.max_y {
                self.ib += 1;
                b.max_y
            } else if b.max_y == a.max_y {
                self.ia += 1;
                self.ib += 1;
                a.max_y
            } else {
                self.ia += 1;
                a.max_y
            };
            Some(self.emit(top_a, bottom, a.spans.spans(), b.spans.spans()))
        } else if top_a < top_b {
            // A starts first: emit A alone down to B's top or A's bottom.
            let bottom = if top_b >= a.max_y {
                self.ia += 1;
                a.max_y
            } else {
                top_b
            };
            Some(self.emit(top_a, bottom, a.spans.spans(), &[]))
        } else {
            let bottom = if top_a >= b.max_y {
                self.ib += 1;
                b.max_y
            } else {
                top_a
            };
            Some(self.emit(top_b, bottom, &[], b.spans.spans()))
        }
    }
}
