// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region basics.
//!
//! Build regions from rectangles, combine them, and inspect the result.
//!
//! Run:
//! - `cargo run -p understory_region_demos --example region_basics`

use kurbo::{Point, Rect, Size};
use understory_region::{IntervalSet, Region, Relation};

fn main() {
    // One-dimensional sets first.
    let row = IntervalSet::new(0.0, 100.0).unwrap();
    let gap = IntervalSet::from_spans(&[20.0, 30.0, 60.0, 70.0]).unwrap();
    let holes = &row - &gap;
    println!("row minus gaps: {:?}", holes.spans());
    assert_eq!(holes.count(), 3);

    // Two overlapping squares.
    let a = Region::from_rect(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    let b = Region::from_rect((Point::new(50.0, 50.0), Size::new(100.0, 100.0))).unwrap();

    let union = &a | &b;
    let both = &a & &b;
    let only_a = &a - &b;
    let either = &a ^ &b;
    println!("union: {} rects, bounds {:?}", union.count(), union.bounds());
    println!("intersection: {:?}", both.rects());
    println!("a minus b: {:?}", only_a.rects());
    println!("symmetric difference: {} rects", either.count());

    assert_eq!(a.relate(&b), Relation::Intersect);
    assert_eq!(union.relate(&both), Relation::AContainsB);
    assert!(union.is_point_in(120.0, 120.0));
    assert!(!only_a.is_point_in(75.0, 75.0));

    // Outlines for drawing.
    for (i, polygon) in union.contour().unwrap().iter().enumerate() {
        println!("outline {i}: {polygon:?}");
    }

    // Complements are unbounded.
    let outside = !&a;
    println!("complement is infinite: {}", outside.is_infinite());
    assert_eq!(outside.complement(), a);
}
