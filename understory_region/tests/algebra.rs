// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Set-algebra laws checked against random inputs.

use kurbo::Rect;
use proptest::prelude::*;
use understory_region::{Band, IntervalSet, Region, Relation, SetOp};

const OPS: [SetOp; 4] = [SetOp::Union, SetOp::Intersect, SetOp::Xor, SetOp::Subtract];

fn expect(op: SetOp, a: bool, b: bool) -> bool {
    match op {
        SetOp::Union => a || b,
        SetOp::Intersect => a && b,
        SetOp::Xor => a != b,
        SetOp::Subtract => a && !b,
    }
}

fn interval_set() -> impl Strategy<Value = IntervalSet> {
    prop::collection::vec((-20_i32..20, 1_i32..8), 0..6).prop_map(|spans| {
        spans.into_iter().fold(IntervalSet::empty(), |acc, (start, len)| {
            let span = IntervalSet::new(f64::from(start), f64::from(start + len)).unwrap();
            acc.union(&span)
        })
    })
}

fn rects() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec((0_i32..20, 0_i32..20, 1_i32..8, 1_i32..8), 0..7).prop_map(|v| {
        v.into_iter()
            .map(|(x, y, w, h)| {
                let (x, y) = (f64::from(x), f64::from(y));
                Rect::new(x, y, x + f64::from(w), y + f64::from(h))
            })
            .collect()
    })
}

fn region() -> impl Strategy<Value = Region> {
    rects().prop_map(|r| Region::from_rects(r).unwrap())
}

/// Sample coordinates on and between every integer in the test range.
fn samples() -> impl Iterator<Item = f64> {
    (-2..60).map(|i| f64::from(i) * 0.5)
}

fn assert_canonical(r: &Region) {
    let bands = r.raw_bands();
    for b in &bands {
        assert!(b.min_y < b.max_y, "inverted band {b:?}");
        assert!(!b.spans.is_empty(), "empty band {b:?}");
        for pair in b.spans.spans().windows(2) {
            assert!(pair[0] < pair[1], "unsorted spans {b:?}");
        }
    }
    for pair in bands.windows(2) {
        assert!(pair[0].max_y <= pair[1].min_y, "overlapping bands");
        assert!(
            pair[0].max_y < pair[1].min_y || pair[0].spans != pair[1].spans,
            "uncoalesced bands at y = {}",
            pair[0].max_y
        );
    }
}

fn area(r: &Region) -> f64 {
    r.rects().iter().map(Rect::area).sum()
}

fn shoelace(poly: &[kurbo::Point]) -> f64 {
    let n = poly.len();
    (0..n)
        .map(|i| {
            let (a, b) = (poly[i], poly[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

/// Winding number of `(x, y)`, counting vertical edges to the right of the
/// point. Clockwise windings in y-down space count `+1`.
fn winding(polys: &[Vec<kurbo::Point>], x: f64, y: f64) -> i32 {
    let mut w = 0;
    for p in polys {
        for i in 0..p.len() {
            let (s, e) = (p[i], p[(i + 1) % p.len()]);
            if s.x == e.x && s.x > x && s.y.min(e.y) < y && y < s.y.max(e.y) {
                w += if e.y > s.y { 1 } else { -1 };
            }
        }
    }
    w
}

fn expected_relation(a: &Region, b: &Region) -> Relation {
    if a == b {
        Relation::Equal
    } else if a.intersect(b).is_empty() {
        Relation::None
    } else if b.subtract(a).is_empty() {
        Relation::AContainsB
    } else if a.subtract(b).is_empty() {
        Relation::BContainsA
    } else {
        Relation::Intersect
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, failure_persistence: None, .. ProptestConfig::default() })]

    #[test]
    fn interval_ops_match_pointwise(a in interval_set(), b in interval_set()) {
        for op in OPS {
            let c = a.combine(&b, op);
            for x in (-44..58).map(|i| f64::from(i) * 0.5) {
                prop_assert_eq!(
                    c.is_point_in(x),
                    expect(op, a.is_point_in(x), b.is_point_in(x)),
                    "{:?} at {}", op, x
                );
            }
        }
    }

    #[test]
    fn interval_laws(a in interval_set(), b in interval_set(), c in interval_set()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
        prop_assert_eq!(a.xor(&b), b.xor(&a));
        prop_assert_eq!(a.union(&a), a.clone());
        prop_assert!(a.xor(&a).is_empty());
        prop_assert_eq!(a.complement().complement(), a.clone());
        prop_assert_eq!(a.subtract(&b), a.intersect(&b.complement()));
        prop_assert_eq!(a.union(&b).complement(), a.complement().intersect(&b.complement()));
        prop_assert_eq!(a.intersect(&b.union(&c)), a.intersect(&b).union(&a.intersect(&c)));
        prop_assert_eq!(IntervalSet::from_spans(a.spans()).unwrap(), a.clone());
        prop_assert_eq!(a.does_intersect(&b), !a.intersect(&b).is_empty());
    }

    #[test]
    fn region_ops_match_pointwise(a in region(), b in region()) {
        for op in OPS {
            let c = a.combine(&b, op);
            assert_canonical(&c);
            for y in samples() {
                for x in samples() {
                    prop_assert_eq!(
                        c.is_point_in(x, y),
                        expect(op, a.is_point_in(x, y), b.is_point_in(x, y)),
                        "{:?} at ({}, {})", op, x, y
                    );
                }
            }
        }
    }

    #[test]
    fn region_laws(a in region(), b in region(), c in region()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
        prop_assert_eq!(a.xor(&b), b.xor(&a));
        prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        prop_assert_eq!(a.intersect(&b).intersect(&c), a.intersect(&b.intersect(&c)));
        prop_assert_eq!(a.intersect(&b.union(&c)), a.intersect(&b).union(&a.intersect(&c)));
        prop_assert_eq!(a.union(&b.intersect(&c)), a.union(&b).intersect(&a.union(&c)));
        prop_assert_eq!(a.intersect(&a), a.clone());
        prop_assert!(a.subtract(&a).is_empty());
        prop_assert_eq!(a.complement().complement(), a.clone());
        prop_assert_eq!(a.union(&a.complement()), Region::infinite());
        prop_assert!(a.intersect(&a.complement()).is_empty());
        prop_assert_eq!(a.subtract(&b), a.intersect(&b.complement()));
        prop_assert_eq!(a.xor(&b), a.subtract(&b).union(&b.subtract(&a)));
        prop_assert_eq!(a.union(&b).complement(), a.complement().intersect(&b.complement()));
    }

    #[test]
    fn equal_regions_share_checksums(rs in rects()) {
        let forward = Region::from_rects(&rs).unwrap();
        let backward = Region::from_rects(rs.iter().rev()).unwrap();
        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(forward.checksum(), backward.checksum());
        prop_assert_eq!(forward.count(), forward.rects().len());
        let rebuilt = Region::from_raw_bands(forward.raw_bands()).unwrap();
        prop_assert_eq!(rebuilt, forward);
    }

    #[test]
    fn interval_relate_is_consistent(a in interval_set(), b in interval_set()) {
        let relation = a.relate(&b);
        prop_assert_eq!(relation == Relation::Equal, a == b);
        match relation {
            Relation::AContainsB => prop_assert_eq!(a.intersect(&b), b.clone()),
            Relation::BContainsA => prop_assert_eq!(a.intersect(&b), a.clone()),
            Relation::None => prop_assert!(a.intersect(&b).is_empty()),
            Relation::Intersect => {
                prop_assert!(!a.subtract(&b).is_empty());
                prop_assert!(!b.subtract(&a).is_empty());
                prop_assert!(!a.intersect(&b).is_empty());
            }
            Relation::Equal => {}
        }
        if !a.is_empty() || !b.is_empty() {
            prop_assert_eq!(relation == Relation::None, !a.does_intersect(&b));
        }
    }

    #[test]
    fn relate_is_consistent(a in region(), b in region()) {
        prop_assert_eq!(a.relate(&b), expected_relation(&a, &b));
        prop_assert_eq!(a.does_intersect(&b), !a.intersect(&b).is_empty());
    }

    #[test]
    fn contour_area_matches_rects(a in region()) {
        let polys = a.contour().unwrap();
        let traced: f64 = polys.iter().map(|p| shoelace(p)).sum();
        prop_assert_eq!(traced, area(&a));
        for p in &polys {
            prop_assert!(p.len() >= 4);
            prop_assert!(p.len() % 2 == 0);
            for i in 0..p.len() {
                let (s, e) = (p[i], p[(i + 1) % p.len()]);
                let next = p[(i + 2) % p.len()];
                prop_assert!(s != e, "repeated vertex {:?}", s);
                // Rectilinear, with horizontal and vertical moves alternating.
                prop_assert!(s.x == e.x || s.y == e.y);
                prop_assert_ne!(s.y == e.y, e.y == next.y, "collinear run at {:?}", e);
                prop_assert!(!p[..i].contains(&s), "vertex {:?} visited twice", s);
            }
        }
    }

    #[test]
    fn contour_covers_the_region(a in region()) {
        let polys = a.contour().unwrap();
        for y in (-1..28).map(|i| f64::from(i) + 0.5) {
            for x in (-1..28).map(|i| f64::from(i) + 0.5) {
                let w = winding(&polys, x, y);
                prop_assert!(w.abs() <= 1, "overlapping windings at ({}, {})", x, y);
                prop_assert_eq!(w != 0, a.is_point_in(x, y), "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn translate_round_trips(a in region(), dx in -10_i32..10, dy in -10_i32..10) {
        let (dx, dy) = (f64::from(dx), f64::from(dy));
        let moved = a.translate(dx, dy).unwrap();
        prop_assert_eq!(area(&moved), area(&a));
        prop_assert_eq!(moved.translate(-dx, -dy).unwrap(), a.clone());
        let doubled = a.scale(2.0, 2.0).unwrap();
        prop_assert_eq!(area(&doubled), area(&a) * 4.0);
    }
}

#[test]
fn raw_bands_with_gaps_survive_round_trip() {
    let spans = IntervalSet::from_spans(&[0.0, 1.0, 3.0, 4.0]).unwrap();
    let bands = vec![
        Band::new(0.0, 1.0, spans.clone()),
        Band::new(2.0, 3.0, spans),
    ];
    let r = Region::from_raw_bands(bands.clone()).unwrap();
    assert_eq!(r.raw_bands(), bands);
    assert_eq!(r.count(), 4);
}
