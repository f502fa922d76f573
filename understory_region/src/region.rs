// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-dimensional regions stored as canonical band lists.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{BitAnd, BitOr, BitXor, Not, Sub};

use kurbo::{Point, Rect};

use crate::band::{Band, BandPairs};
use crate::contour;
use crate::error::RegionError;
use crate::interval::{IntervalSet, check_transform, fold_checksum, map_boundary};
use crate::rect::RectSource;
use crate::sweep;
use crate::types::{RelateFlags, Relation, SetOp};

/// Band count at or below which point lookup scans linearly.
const LINEAR_SCAN_MAX: usize = 5;

/// A set of points in the plane built from axis-aligned rectangles.
///
/// Internally a region is a list of horizontal [`Band`]s sorted top to
/// bottom, each carrying an [`IntervalSet`] of horizontal spans. This is the
/// classic X11 region model: it is not always the fewest rectangles, but every
/// Boolean operation runs in a single O(n + m) sweep.
///
/// Regions are immutable values; clones share storage and every operation
/// returns a new region.
///
/// ```
/// use kurbo::Rect;
/// use understory_region::Region;
///
/// let a = Region::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0))?;
/// let b = Region::from_rect(Rect::new(5.0, 5.0, 15.0, 15.0))?;
///
/// let both = a.intersect(&b);
/// assert_eq!(both.bounds(), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
/// assert_eq!(both.count(), 1);
///
/// let either = a.union(&b);
/// assert!(either.is_point_in(12.0, 12.0));
/// assert!(!either.is_point_in(12.0, 2.0));
/// # Ok::<(), understory_region::RegionError>(())
/// ```
#[derive(Clone)]
pub struct Region {
    data: Arc<RegionData>,
}

#[derive(Debug)]
struct RegionData {
    bands: Vec<Band>,
    /// Total number of rectangles (spans summed over bands).
    count: usize,
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    checksum: i32,
}

/// Accumulates bands in order, coalescing and tracking the summary fields.
struct BandBuilder {
    bands: Vec<Band>,
    count: usize,
    min_x: f64,
    max_x: f64,
    checksum: i32,
}

impl BandBuilder {
    fn with_capacity(n: usize) -> Self {
        Self {
            bands: Vec::with_capacity(n),
            count: 0,
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            checksum: 0,
        }
    }

    /// Extend the previous band instead of appending when it touches
    /// `min_y` and carries `spans`.
    fn try_extend(&mut self, min_y: f64, max_y: f64, spans: &[f64]) -> bool {
        match self.bands.last_mut() {
            Some(last) if last.max_y == min_y && last.spans.spans() == spans => {
                last.max_y = max_y;
                true
            }
            _ => false,
        }
    }

    /// Append a combine result; empty rows are dropped.
    fn push_spans(&mut self, min_y: f64, max_y: f64, spans: Vec<f64>) {
        if spans.is_empty() || self.try_extend(min_y, max_y, &spans) {
            return;
        }
        self.append(Band::new(min_y, max_y, IntervalSet::from_trusted(spans)));
    }

    /// Append an already-built band.
    fn push_band(&mut self, band: Band) {
        if self.try_extend(band.min_y, band.max_y, band.spans.spans()) {
            return;
        }
        self.append(band);
    }

    fn append(&mut self, band: Band) {
        self.count += band.spans.count();
        self.min_x = self.min_x.min(band.spans.min());
        self.max_x = self.max_x.max(band.spans.max());
        self.checksum = fold_checksum(self.checksum, band.spans.checksum());
        self.bands.push(band);
    }

    fn finish(self) -> Region {
        let (min_y, max_y) = match (self.bands.first(), self.bands.last()) {
            (Some(first), Some(last)) => (first.min_y, last.max_y),
            _ => (f64::INFINITY, f64::NEG_INFINITY),
        };
        debug_assert!(is_canonical(&self.bands), "non-canonical bands");
        Region {
            data: Arc::new(RegionData {
                bands: self.bands,
                count: self.count,
                min_x: self.min_x,
                min_y,
                max_x: self.max_x,
                max_y,
                checksum: self.checksum,
            }),
        }
    }
}

impl Region {
    /// The empty region.
    pub fn empty() -> Self {
        BandBuilder::with_capacity(0).finish()
    }

    /// The whole plane.
    pub fn infinite() -> Self {
        let mut builder = BandBuilder::with_capacity(1);
        builder.push_band(Band::new(
            f64::NEG_INFINITY,
            f64::INFINITY,
            IntervalSet::infinite(),
        ));
        builder.finish()
    }

    /// A region covering one rectangle.
    ///
    /// Fails with [`RegionError::InvalidRect`] when the width or height is not
    /// positive.
    pub fn from_rect(rect: impl RectSource) -> Result<Self, RegionError> {
        let extent = rect.to_extent()?;
        let spans = IntervalSet::from_trusted(alloc::vec![extent.x0, extent.x1]);
        let mut builder = BandBuilder::with_capacity(1);
        builder.push_band(Band::new(extent.y0, extent.y1, spans));
        Ok(builder.finish())
    }

    /// The union of many rectangles.
    ///
    /// This performs one union per rectangle, which is fine for small inputs.
    pub fn from_rects<I>(rects: I) -> Result<Self, RegionError>
    where
        I: IntoIterator,
        I::Item: RectSource,
    {
        let mut rects = rects.into_iter();
        let Some(first) = rects.next() else {
            return Ok(Self::empty());
        };
        let mut region = Self::from_rect(first)?;
        for rect in rects {
            region = region.union(&Self::from_rect(rect)?);
        }
        Ok(region)
    }

    /// Build a region from raw bands, validating them in O(n).
    ///
    /// Bands must be sorted by `min_y`, have `min_y < max_y`, not overlap
    /// their predecessor, and carry nonempty spans; otherwise this fails with
    /// [`RegionError::InvalidBand`] naming the offending band. Y-contiguous
    /// bands with equal spans are merged.
    pub fn from_raw_bands<I>(bands: I) -> Result<Self, RegionError>
    where
        I: IntoIterator<Item = Band>,
    {
        let bands = bands.into_iter();
        let mut builder = BandBuilder::with_capacity(bands.size_hint().0);
        let mut prev_max = f64::NEG_INFINITY;
        for (index, band) in bands.enumerate() {
            // Written to reject NaN edges as well.
            let ordered = band.min_y >= prev_max && band.min_y < band.max_y;
            if !ordered || band.spans.is_empty() {
                return Err(RegionError::InvalidBand { index });
            }
            prev_max = band.max_y;
            builder.push_band(band);
        }
        Ok(builder.finish())
    }

    /// Apply a Boolean operator.
    ///
    /// Equivalent to calling the named method for `op`.
    pub fn combine(&self, other: &Self, op: SetOp) -> Self {
        match op {
            SetOp::Union => self.union(other),
            SetOp::Intersect => self.intersect(other),
            SetOp::Xor => self.xor(other),
            SetOp::Subtract => self.subtract(other),
        }
    }

    fn sweep_bands(&self, other: &Self, op: SetOp) -> Self {
        let a = &self.data.bands;
        let b = &other.data.bands;
        let mut builder = BandBuilder::with_capacity(a.len() + b.len());
        for slice in BandPairs::new(a, b) {
            let row = sweep::combine(slice.a, slice.b, op);
            builder.push_spans(slice.min_y, slice.max_y, row);
        }
        builder.finish()
    }

    /// Points in either region.
    pub fn union(&self, other: &Self) -> Self {
        self.sweep_bands(other, SetOp::Union)
    }

    /// Points in both regions.
    pub fn intersect(&self, other: &Self) -> Self {
        if !self.bounds_overlap(other) {
            return Self::empty();
        }
        self.sweep_bands(other, SetOp::Intersect)
    }

    /// Points in `self` but not in `other`.
    pub fn subtract(&self, other: &Self) -> Self {
        if !self.bounds_overlap(other) {
            return self.clone();
        }
        self.sweep_bands(other, SetOp::Subtract)
    }

    /// Points in exactly one of the regions.
    pub fn xor(&self, other: &Self) -> Self {
        self.sweep_bands(other, SetOp::Xor)
    }

    /// Every point of the plane not in the region.
    ///
    /// Computed as `xor` with [`Region::infinite`].
    pub fn complement(&self) -> Self {
        self.sweep_bands(&Self::infinite(), SetOp::Xor)
    }

    /// Whether the regions share any point.
    ///
    /// Stops at the first band slice whose rows overlap, without building the
    /// intersection.
    pub fn does_intersect(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() || !self.bounds_overlap(other) {
            return false;
        }
        BandPairs::new(&self.data.bands, &other.data.bands)
            .any(|slice| sweep::intersects(slice.a, slice.b))
    }

    /// Classify how the two regions overlap.
    pub fn relate(&self, other: &Self) -> Relation {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => return Relation::Equal,
            (true, false) | (false, true) => return Relation::None,
            (false, false) => {}
        }
        if !self.bounds_overlap(other) {
            return Relation::None;
        }
        let mut flags = RelateFlags::start();
        for slice in BandPairs::new(&self.data.bands, &other.data.bands) {
            match (slice.a.is_empty(), slice.b.is_empty()) {
                (true, true) => {}
                (false, true) => flags.remove(RelateFlags::B_CONTAINS_A),
                (true, false) => flags.remove(RelateFlags::A_CONTAINS_B),
                (false, false) => match sweep::relate(slice.a, slice.b, false) {
                    Relation::None => {
                        flags.remove(RelateFlags::A_CONTAINS_B | RelateFlags::B_CONTAINS_A);
                    }
                    Relation::Intersect => flags = RelateFlags::INTERSECTS,
                    Relation::AContainsB => {
                        flags.insert(RelateFlags::INTERSECTS);
                        flags.remove(RelateFlags::B_CONTAINS_A);
                    }
                    Relation::BContainsA => {
                        flags.insert(RelateFlags::INTERSECTS);
                        flags.remove(RelateFlags::A_CONTAINS_B);
                    }
                    Relation::Equal => flags.insert(RelateFlags::INTERSECTS),
                },
            }
            if flags == RelateFlags::INTERSECTS {
                break;
            }
        }
        flags.relation()
    }

    /// Whether the point `(x, y)` lies inside the region.
    ///
    /// Runs in O(log n) over bands, then O(log k) within the band.
    pub fn is_point_in(&self, x: f64, y: f64) -> bool {
        let d = &*self.data;
        if d.bands.is_empty() || y < d.min_y || y > d.max_y || x < d.min_x || x > d.max_x {
            return false;
        }
        let band = if d.bands.len() <= LINEAR_SCAN_MAX {
            d.bands.iter().find(|b| y >= b.min_y && y < b.max_y)
        } else {
            let i = d.bands.partition_point(|b| b.max_y <= y);
            d.bands.get(i).filter(|b| b.min_y <= y)
        };
        band.is_some_and(|b| b.spans.is_point_in(x))
    }

    /// Map `(x, y)` to `(x * scale_x + offset_x, y * scale_y + offset_y)`.
    ///
    /// Scales must be finite and nonzero and offsets finite. The mapped bands
    /// are validated again, so a negative scale or rounding that collapses
    /// an edge is reported as an error, as is a finite edge that overflows.
    pub fn transform(
        &self,
        scale_x: f64,
        scale_y: f64,
        offset_x: f64,
        offset_y: f64,
    ) -> Result<Self, RegionError> {
        check_transform(scale_x, offset_x)?;
        check_transform(scale_y, offset_y)?;
        let mut bands = Vec::with_capacity(self.data.bands.len());
        for band in &self.data.bands {
            bands.push(Band::new(
                map_boundary(band.min_y, scale_y, offset_y)?,
                map_boundary(band.max_y, scale_y, offset_y)?,
                band.spans.transform(scale_x, offset_x)?,
            ));
        }
        Self::from_raw_bands(bands)
    }

    /// Shift the region.
    pub fn translate(&self, offset_x: f64, offset_y: f64) -> Result<Self, RegionError> {
        self.transform(1.0, 1.0, offset_x, offset_y)
    }

    /// Scale the region about the origin.
    pub fn scale(&self, scale_x: f64, scale_y: f64) -> Result<Self, RegionError> {
        self.transform(scale_x, scale_y, 0.0, 0.0)
    }

    /// True if the region holds no points.
    pub fn is_empty(&self) -> bool {
        self.data.bands.is_empty()
    }

    /// True if the region reaches infinity in any direction.
    pub fn is_infinite(&self) -> bool {
        let d = &*self.data;
        d.min_x == f64::NEG_INFINITY
            || d.min_y == f64::NEG_INFINITY
            || d.max_x == f64::INFINITY
            || d.max_y == f64::INFINITY
    }

    /// True if the region is bounded.
    pub fn is_finite(&self) -> bool {
        !self.is_infinite()
    }

    /// True if the region is exactly one rectangle.
    pub fn is_rectangular(&self) -> bool {
        self.data.count == 1
    }

    /// Number of rectangles returned by [`Region::rects`].
    pub fn count(&self) -> usize {
        self.data.count
    }

    /// Content checksum; equal regions always have equal checksums.
    pub fn checksum(&self) -> i32 {
        self.data.checksum
    }

    /// The bounding rectangle, or `None` for the empty region.
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        let d = &*self.data;
        Some(Rect::new(d.min_x, d.min_y, d.max_x, d.max_y))
    }

    /// Non-overlapping rectangles covering the region, top to bottom and
    /// left to right.
    pub fn rects(&self) -> Vec<Rect> {
        let mut out = Vec::with_capacity(self.data.count);
        for band in &self.data.bands {
            band.spans.extend_rects(band.min_y, band.max_y, &mut out);
        }
        out
    }

    /// The bands, top to bottom.
    pub fn bands(&self) -> &[Band] {
        &self.data.bands
    }

    /// A copy of the bands, suitable for [`Region::from_raw_bands`].
    pub fn raw_bands(&self) -> Vec<Band> {
        self.data.bands.clone()
    }

    /// Closed rectilinear polygons tracing the region's boundary.
    ///
    /// Outer boundaries run clockwise in y-down coordinates (top edges left to
    /// right); hole boundaries run the other way. Collinear vertical runs are
    /// merged into single edges.
    pub fn contour(&self) -> Result<Vec<Vec<Point>>, RegionError> {
        contour::trace(&self.data.bands)
    }

    /// Conservative O(1) test: touching boxes count as overlapping.
    fn bounds_overlap(&self, other: &Self) -> bool {
        let (a, b) = (&*self.data, &*other.data);
        !(a.min_x > b.max_x || a.max_x < b.min_x || a.min_y > b.max_y || a.max_y < b.min_y)
    }
}

/// Whether bands satisfy every band-list invariant.
fn is_canonical(bands: &[Band]) -> bool {
    let each = bands
        .iter()
        .all(|b| b.min_y < b.max_y && !b.spans.is_empty());
    let pairs = bands.windows(2).all(|w| {
        w[0].max_y <= w[1].min_y && !(w[0].max_y == w[1].min_y && w[0].spans == w[1].spans)
    });
    each && pairs
}

impl Default for Region {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Rect> for Region {
    type Error = RegionError;

    fn try_from(rect: Rect) -> Result<Self, RegionError> {
        Self::from_rect(rect)
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        let (a, b) = (&*self.data, &*other.data);
        if a.checksum != b.checksum || a.count != b.count || a.bands.len() != b.bands.len() {
            return false;
        }
        a.bands.iter().zip(&b.bands).all(|(x, y)| {
            x.min_y == y.min_y && x.max_y == y.max_y && x.spans == y.spans
        })
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &*self.data;
        f.debug_struct("Region")
            .field("bands", &d.bands.len())
            .field("rects", &d.count)
            .field("bounds", &self.bounds())
            .field("checksum", &d.checksum)
            .finish_non_exhaustive()
    }
}

impl BitOr for &Region {
    type Output = Region;

    fn bitor(self, rhs: Self) -> Region {
        self.union(rhs)
    }
}

impl BitAnd for &Region {
    type Output = Region;

    fn bitand(self, rhs: Self) -> Region {
        self.intersect(rhs)
    }
}

impl BitXor for &Region {
    type Output = Region;

    fn bitxor(self, rhs: Self) -> Region {
        self.xor(rhs)
    }
}

impl Sub for &Region {
    type Output = Region;

    fn sub(self, rhs: Self) -> Region {
        self.subtract(rhs)
    }
}

impl Not for &Region {
    type Output = Region;

    fn not(self) -> Region {
        self.complement()
    }
}
