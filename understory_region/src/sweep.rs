// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional plane sweep over raw span boundaries.
//!
//! A boundary slice `[s0, e0, s1, e1, ...]` is read as an alternating stream of
//! depth events: `+1` at every even index (span start) and `-1` at every odd
//! index (span end). Two such streams are merged in ascending order, and all
//! events sharing a coordinate are applied before the state is evaluated, so a
//! span ending exactly where another begins never produces a zero-width piece.

use alloc::vec::Vec;

use crate::types::{RelateFlags, Relation, SetOp};

/// Which operand an event came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Source {
    A,
    B,
}

/// A single depth event.
#[derive(Copy, Clone, Debug)]
struct Boundary {
    x: f64,
    delta: i32,
    source: Source,
}

/// Yields the boundaries of two sorted slices in ascending order.
///
/// On ties the B event comes first; order within one coordinate is irrelevant
/// because [`DepthSweep`] applies a whole coordinate at once.
#[derive(Clone, Debug)]
struct BoundaryCursor<'a> {
    a: &'a [f64],
    b: &'a [f64],
    ia: usize,
    ib: usize,
}

impl<'a> BoundaryCursor<'a> {
    fn new(a: &'a [f64], b: &'a [f64]) -> Self {
        Self { a, b, ia: 0, ib: 0 }
    }

    fn take_a(&mut self) -> Boundary {
        let i = self.ia;
        self.ia += 1;
        Boundary {
            x: self.a[i],
            delta: depth_delta(i),
            source: Source::A,
        }
    }

    fn take_b(&mut self) -> Boundary {
        let i = self.ib;
        self.ib += 1;
        Boundary {
            x: self.b[i],
            delta: depth_delta(i),
            source: Source::B,
        }
    }
}

impl Iterator for BoundaryCursor<'_> {
    type Item = Boundary;

    fn next(&mut self) -> Option<Boundary> {
        match (self.a.get(self.ia), self.b.get(self.ib)) {
            (None, None) => None,
            (Some(_), None) => Some(self.take_a()),
            (Some(xa), Some(xb)) if xa < xb => Some(self.take_a()),
            (_, Some(_)) => Some(self.take_b()),
        }
    }
}

#[inline]
const fn depth_delta(index: usize) -> i32 {
    if index & 1 == 0 { 1 } else { -1 }
}

/// Depths of both operands just after a coordinate.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Step {
    pub(crate) x: f64,
    pub(crate) depth_a: i32,
    pub(crate) depth_b: i32,
}

/// Groups merged boundaries by coordinate and tracks running depths.
///
/// Only one event of lookahead is kept.
#[derive(Clone, Debug)]
pub(crate) struct DepthSweep<'a> {
    cursor: BoundaryCursor<'a>,
    pending: Option<Boundary>,
    depth_a: i32,
    depth_b: i32,
}

impl<'a> DepthSweep<'a> {
    pub(crate) fn new(a: &'a [f64], b: &'a [f64]) -> Self {
        let mut cursor = BoundaryCursor::new(a, b);
        let pending = cursor.next();
        Self {
            cursor,
            pending,
            depth_a: 0,
            depth_b: 0,
        }
    }

    fn apply(&mut self, event: Boundary) {
        match event.source {
            Source::A => self.depth_a += event.delta,
            Source::B => self.depth_b += event.delta,
        }
    }

    /// Apply every event at the next coordinate and report the new depths.
    pub(crate) fn advance(&mut self) -> Option<Step> {
        let first = self.pending.take()?;
        self.apply(first);
        loop {
            match self.cursor.next() {
                Some(event) if event.x == first.x => self.apply(event),
                other => {
                    self.pending = other;
                    break;
                }
            }
        }
        Some(Step {
            x: first.x,
            depth_a: self.depth_a,
            depth_b: self.depth_b,
        })
    }
}

/// Combine two canonical boundary slices with `op`.
///
/// Runs in O(n + m) and returns canonical boundaries: a coordinate is emitted
/// exactly when the operator's state changes there.
pub(crate) fn combine(a: &[f64], b: &[f64], op: SetOp) -> Vec<f64> {
    if a.is_empty() && b.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(a.len() + b.len());
    let mut sweep = DepthSweep::new(a, b);
    let mut state = false;
    while let Some(step) = sweep.advance() {
        let next = op.apply(step.depth_a, step.depth_b);
        if next != state {
            out.push(step.x);
            state = next;
        }
    }
    out
}

/// Classify how two canonical boundary slices relate.
///
/// With `early_out`, returns [`Relation::Intersect`] as soon as any overlap is
/// seen, which is all [`intersects`] needs.
pub(crate) fn relate(a: &[f64], b: &[f64], early_out: bool) -> Relation {
    let (Some(&a_min), Some(&a_max), Some(&b_min), Some(&b_max)) =
        (a.first(), a.last(), b.first(), b.last())
    else {
        return if a.is_empty() && b.is_empty() {
            Relation::Equal
        } else {
            Relation::None
        };
    };
    if a_max < b_min || b_max < a_min {
        return Relation::None;
    }

    let mut flags = RelateFlags::start();
    let mut sweep = DepthSweep::new(a, b);
    while let Some(step) = sweep.advance() {
        flags.observe(step.depth_a, step.depth_b);
        if early_out && flags.contains(RelateFlags::INTERSECTS) {
            return Relation::Intersect;
        }
    }
    flags.relation()
}

/// Whether two canonical boundary slices share any point.
pub(crate) fn intersects(a: &[f64], b: &[f64]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    relate(a, b, true) != Relation::None
}

/// Boundary count at or below which point lookup scans linearly.
const LINEAR_SCAN_MAX: usize = 8;

/// Whether `x` falls inside one of the spans.
pub(crate) fn contains(spans: &[f64], x: f64) -> bool {
    let (Some(&min), Some(&max)) = (spans.first(), spans.last()) else {
        return false;
    };
    if x < min || x > max {
        return false;
    }
    if spans.len() <= LINEAR_SCAN_MAX {
        spans
            .chunks_exact(2)
            .any(|pair| x >= pair[0] && x < pair[1])
    } else {
        // The rightmost boundary <= x is a start boundary iff x is inside.
        let at_or_before = spans.partition_point(|&v| v <= x);
        at_or_before & 1 == 1
    }
}

/// Complement: toggle the open/closed state at both infinities.
pub(crate) fn complement(spans: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(spans.len() + 2);
    let Some((&first, _)) = spans.split_first() else {
        out.push(f64::NEG_INFINITY);
        out.push(f64::INFINITY);
        return out;
    };
    let mut rest = spans;
    if first == f64::NEG_INFINITY {
        rest = &rest[1..];
    } else {
        out.push(f64::NEG_INFINITY);
    }
    match rest.split_last() {
        Some((&last, body)) if last == f64::INFINITY => out.extend_from_slice(body),
        _ => {
            out.extend_from_slice(rest);
            out.push(f64::INFINITY);
        }
    }
    out
}
