// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle descriptors accepted by [`Region::from_rect`](crate::Region::from_rect).

use kurbo::{Point, Rect, Size};

use crate::error::RegionError;

/// Something that describes one axis-aligned rectangle.
///
/// Implemented for the common descriptor shapes:
/// - [`Rect`]: two corners `(x0, y0)` and `(x1, y1)`, taken as given.
/// - `(Point, Size)`: top-left corner plus size.
/// - `(Point, Point)`: top-left and bottom-right corners.
/// - `[f64; 4]` and `(f64, f64, f64, f64)`: `min_x, min_y, max_x, max_y`.
///
/// No descriptor is reordered: a rectangle whose right/bottom edge is not
/// strictly past its left/top edge is rejected by [`RectSource::to_extent`].
pub trait RectSource {
    /// The rectangle as `(min_x, min_y, max_x, max_y)`, without validation.
    fn min_max(&self) -> (f64, f64, f64, f64);

    /// The validated extent, rejecting zero or negative sizes (and NaN).
    fn to_extent(&self) -> Result<Rect, RegionError> {
        let (min_x, min_y, max_x, max_y) = self.min_max();
        if max_x > min_x && max_y > min_y {
            Ok(Rect::new(min_x, min_y, max_x, max_y))
        } else {
            Err(RegionError::InvalidRect {
                min_x,
                min_y,
                max_x,
                max_y,
            })
        }
    }
}

impl RectSource for Rect {
    fn min_max(&self) -> (f64, f64, f64, f64) {
        (self.x0, self.y0, self.x1, self.y1)
    }
}

impl RectSource for (Point, Size) {
    fn min_max(&self) -> (f64, f64, f64, f64) {
        let (origin, size) = *self;
        (
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }
}

impl RectSource for (Point, Point) {
    fn min_max(&self) -> (f64, f64, f64, f64) {
        (self.0.x, self.0.y, self.1.x, self.1.y)
    }
}

impl RectSource for [f64; 4] {
    fn min_max(&self) -> (f64, f64, f64, f64) {
        let [min_x, min_y, max_x, max_y] = *self;
        (min_x, min_y, max_x, max_y)
    }
}

impl RectSource for (f64, f64, f64, f64) {
    fn min_max(&self) -> (f64, f64, f64, f64) {
        *self
    }
}

impl<T: RectSource + ?Sized> RectSource for &T {
    fn min_max(&self) -> (f64, f64, f64, f64) {
        (**self).min_max()
    }
}
