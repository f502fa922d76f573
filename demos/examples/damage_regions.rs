// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage regions.
//!
//! Accumulate per-frame damage, clip it to the viewport, and scroll it.
//!
//! Run:
//! - `cargo run -p understory_region_demos --example damage_regions`

use kurbo::Rect;
use understory_region::{Region, Relation};

fn main() {
    let viewport = Region::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0)).unwrap();

    // Widgets that repainted this frame.
    let dirty = [
        Rect::new(10.0, 10.0, 200.0, 40.0),
        Rect::new(150.0, 20.0, 400.0, 60.0),
        Rect::new(700.0, 550.0, 900.0, 700.0),
        Rect::new(10.0, 40.0, 200.0, 80.0),
    ];
    let damage = Region::from_rects(dirty).unwrap();
    println!(
        "accumulated damage: {} rects in {} bands",
        damage.count(),
        damage.bands().len()
    );

    let visible = damage.intersect(&viewport);
    for rect in visible.rects() {
        println!("repaint {rect:?}");
    }
    assert!(visible.is_finite());
    assert!(!visible.is_point_in(850.0, 650.0));

    // Scrolling by 25px moves old content; the newly exposed strip is damage.
    let scrolled = viewport.translate(0.0, -25.0).unwrap();
    let exposed = viewport.subtract(&scrolled);
    println!("exposed by scroll: {:?}", exposed.rects());
    assert_eq!(exposed.rects(), vec![Rect::new(0.0, 575.0, 800.0, 600.0)]);

    let next = visible
        .translate(0.0, -25.0)
        .unwrap()
        .union(&exposed)
        .intersect(&viewport);
    println!("next frame damage bounds: {:?}", next.bounds());
    assert_eq!(next.relate(&viewport), Relation::BContainsA);
}
