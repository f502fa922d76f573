// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary tracing: band lists to closed rectilinear polygons.
//!
//! Every band contributes directed boundary edges: horizontal edges where
//! coverage starts or stops between rows, and a right and left edge per span.
//! Edges are oriented so the covered area is always on the right-hand side in
//! y-down coordinates. Tracing then chains edges end to start, preferring a
//! clockwise turn at each vertex, which keeps diagonal pinch points from
//! fusing two polygons into one.

use alloc::vec::Vec;

use hashbrown::HashMap;

use kurbo::Point;

use crate::band::Band;
use crate::error::RegionError;
use crate::sweep;
use crate::types::SetOp;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// The side a clockwise walk turns onto next.
    const fn clockwise(self) -> Self {
        match self {
            Self::Top => Self::Right,
            Self::Right => Self::Bottom,
            Self::Bottom => Self::Left,
            Self::Left => Self::Top,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Edge {
    from: Point,
    to: Point,
    side: Side,
}

/// No neighbor in the edge list.
const NONE: usize = usize::MAX;

/// Edge arena threaded with a doubly linked list of unconsumed edges, plus a
/// start-point index.
///
/// Consumed edges are unlinked but keep their own `next` link, which always
/// points later in insertion order.
#[derive(Debug)]
struct Edges {
    edges: Vec<Edge>,
    used: Vec<bool>,
    next: Vec<usize>,
    prev: Vec<usize>,
    head: usize,
    tail: usize,
    by_start: HashMap<(u64, u64), Vec<usize>>,
}

/// Point key that treats `-0.0` and `0.0` as the same coordinate.
fn key(p: Point) -> (u64, u64) {
    let norm = |v: f64| if v == 0.0 { 0.0_f64 } else { v };
    (norm(p.x).to_bits(), norm(p.y).to_bits())
}

impl Edges {
    fn new() -> Self {
        Self {
            edges: Vec::new(),
            used: Vec::new(),
            next: Vec::new(),
            prev: Vec::new(),
            head: NONE,
            tail: NONE,
            by_start: HashMap::new(),
        }
    }

    fn push(&mut self, from: Point, to: Point, side: Side) {
        let index = self.edges.len();
        self.edges.push(Edge { from, to, side });
        self.used.push(false);
        self.next.push(NONE);
        self.prev.push(self.tail);
        if self.tail == NONE {
            self.head = index;
        } else {
            self.next[self.tail] = index;
        }
        self.tail = index;
        self.by_start.entry(key(from)).or_default().push(index);
    }

    /// Mark an edge consumed and unlink it in O(1).
    fn consume(&mut self, index: usize) {
        self.used[index] = true;
        let (prev, next) = (self.prev[index], self.next[index]);
        if prev == NONE {
            self.head = next;
        } else {
            self.next[prev] = next;
        }
        if next == NONE {
            self.tail = prev;
        } else {
            self.prev[next] = prev;
        }
    }

    fn tops(&mut self, spans: &[f64], y: f64) {
        for pair in spans.chunks_exact(2) {
            self.push(Point::new(pair[0], y), Point::new(pair[1], y), Side::Top);
        }
    }

    fn bottoms(&mut self, spans: &[f64], y: f64) {
        for pair in spans.chunks_exact(2) {
            self.push(Point::new(pair[1], y), Point::new(pair[0], y), Side::Bottom);
        }
    }

    fn sides(&mut self, band: &Band) {
        let (y0, y1) = (band.min_y, band.max_y);
        for (x0, x1) in band.spans.iter() {
            self.push(Point::new(x1, y0), Point::new(x1, y1), Side::Right);
            self.push(Point::new(x0, y1), Point::new(x0, y0), Side::Left);
        }
    }

    fn from_bands(bands: &[Band]) -> Self {
        let mut out = Self::new();
        let mut prev: Option<&Band> = None;
        for band in bands {
            let spans = band.spans.spans();
            match prev {
                None => out.tops(spans, band.min_y),
                Some(p) if p.max_y < band.min_y => {
                    out.bottoms(p.spans.spans(), p.max_y);
                    out.tops(spans, band.min_y);
                }
                Some(p) => {
                    let above = p.spans.spans();
                    out.bottoms(&sweep::combine(above, spans, SetOp::Subtract), band.min_y);
                    out.tops(&sweep::combine(spans, above, SetOp::Subtract), band.min_y);
                }
            }
            out.sides(band);
            prev = Some(band);
        }
        if let Some(last) = prev {
            out.bottoms(last.spans.spans(), last.max_y);
        }
        out
    }

    /// Pick the unused edge leaving `at`, preferring a clockwise turn.
    fn next_from(&self, at: Point, after: Side) -> Option<usize> {
        let candidates = self.by_start.get(&key(at))?;
        let mut unused = candidates.iter().copied().filter(|&i| !self.used[i]);
        let want = after.clockwise();
        unused
            .clone()
            .find(|&i| self.edges[i].side == want)
            .or_else(|| unused.next())
    }

    fn trace(&mut self, start: usize) -> Result<Vec<Point>, RegionError> {
        self.consume(start);
        let origin = self.edges[start].from;
        let mut points = Vec::new();
        let mut current = start;
        loop {
            push_vertex(&mut points, self.edges[current].from);
            let Edge { to, side, .. } = self.edges[current];
            if to == origin {
                break;
            }
            current = self
                .next_from(to, side)
                .ok_or(RegionError::ContourTrace { x: to.x, y: to.y })?;
            self.consume(current);
        }
        // The walk may end partway down a vertical run that continues into
        // the origin.
        let n = points.len();
        if n > 2 && points[n - 2].x == points[n - 1].x && points[n - 1].x == points[0].x {
            points.pop();
        }
        Ok(points)
    }
}

/// Append `p`, folding it into the last vertex when both continue a vertical
/// run.
fn push_vertex(points: &mut Vec<Point>, p: Point) {
    let n = points.len();
    if n >= 2 && points[n - 2].x == points[n - 1].x && points[n - 1].x == p.x {
        points[n - 1].y = p.y;
    } else {
        points.push(p);
    }
}

/// Trace every boundary of a canonical band list.
pub(crate) fn trace(bands: &[Band]) -> Result<Vec<Vec<Point>>, RegionError> {
    let mut edges = Edges::from_bands(bands);
    let mut out = Vec::new();
    // Every untraced winding has a top edge after the cursor, so one forward
    // pass over the list finds them all.
    let mut cursor = edges.head;
    while cursor != NONE {
        if !edges.used[cursor] && edges.edges[cursor].side == Side::Top {
            out.push(edges.trace(cursor)?);
        }
        cursor = edges.next[cursor];
    }
    debug_assert_eq!(edges.head, NONE, "untraced boundary edges");
    Ok(out)
}
