// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_region --heading-base-level=0

//! Understory Region: exact region algebra over axis-aligned rectangles.
//!
//! Understory Region is a reusable building block for damage tracking, clipping, and hit testing.
//!
//! - [`IntervalSet`]: canonical sets of half-open spans on the number line.
//! - [`Region`]: canonical sets of points in the plane, stored as horizontal bands of spans.
//! - Exact union, intersection, difference, symmetric difference, and complement,
//!   each in a single linear sweep.
//! - Containment, relation classification, equality, bounds, and affine scale/translate.
//! - Contour extraction into closed rectilinear polygons.
//!
//! Coordinates are `f64` and geometry types come from Kurbo. Regions may be unbounded
//! (`±inf` edges are allowed), so complement always yields another region.
//!
//! ## Canonical form
//!
//! Every value built by this crate is canonical: spans are strictly increasing and never touch,
//! bands are sorted and never overlap, and vertically adjacent bands with identical spans are
//! merged. Equal point sets therefore have equal representations, and [`PartialEq`] is exact.
//! Invalid inputs are rejected at construction with a [`RegionError`].
//!
//! ## Band model
//!
//! A [`Region`] is the same structure X11 uses for its regions: a list of [`Band`]s, each
//! covering `[min_y, max_y)` with one [`IntervalSet`] shared by every row. Boolean operations
//! walk both band lists top to bottom and run the one-dimensional sweep on each Y-slice, so
//! a combine costs O(n + m) in the total number of span boundaries.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::Rect;
//! use understory_region::{Region, Relation};
//!
//! // Damage from two repaints.
//! let damage = Region::from_rects([
//!     Rect::new(0.0, 0.0, 100.0, 20.0),
//!     Rect::new(40.0, 10.0, 60.0, 80.0),
//! ])?;
//!
//! // Clip to the visible viewport.
//! let viewport = Region::from_rect(Rect::new(0.0, 0.0, 80.0, 50.0))?;
//! let visible = &damage & &viewport;
//!
//! assert_eq!(viewport.relate(&visible), Relation::AContainsB);
//! assert!(visible.is_point_in(50.0, 30.0));
//! assert!(!visible.is_point_in(90.0, 10.0));
//!
//! for rect in visible.rects() {
//!     // Repaint `rect`.
//!     assert!(rect.area() > 0.0);
//! }
//! # Ok::<(), understory_region::RegionError>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.

#![no_std]

extern crate alloc;

mod band;
mod contour;
mod error;
mod interval;
mod rect;
mod region;
mod sweep;
mod types;

pub use band::Band;
pub use error::RegionError;
pub use interval::IntervalSet;
pub use rect::RectSource;
pub use region::Region;
pub use types::{Relation, SetOp};
