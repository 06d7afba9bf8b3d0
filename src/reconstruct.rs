//! Per row reconstruction of the missing field
//!
//! Rows of the main field are copied. Every other row is rebuilt from the main field rows around it,
//! picking the widest kernel the distance to the top and bottom edge allows:
//!
//! 1. 4-tap cubic using rows `y-3`, `y-1`, `y+1`, `y+3`, for `3 <= y < height - 3`
//! 2. copy of row 1 for the first row
//! 3. copy of row `height - 2` for the last row
//! 4. 2-tap average of rows `y-1` and `y+1` for everything else (rows 1, 2, `height-3`, `height-2`)
//!
//! The tiers only cover every row when checked in this order.

use crate::{Field, PlaneMut, PlaneRef};

/// How a single output row is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// Row of the main field, copied verbatim
    Main,

    /// 4-tap cubic interpolation of rows `y-3`, `y-1`, `y+1`, `y+3`
    Cubic,

    /// First row, copy of row 1
    EdgeTop,

    /// Last row, copy of row `y-1`
    EdgeBottom,

    /// Truncating average of rows `y-1` and `y+1`
    Linear,
}

impl RowKind {
    /// Classify row `y` of a plane with `height` rows
    ///
    /// A plane of a single row has nothing to interpolate from, its only row is always copied.
    #[inline]
    pub fn classify(y: usize, height: usize, field: Field) -> Self {
        debug_assert!(y < height);

        if field.is_main_row(y) || height == 1 {
            RowKind::Main
        } else if y >= 3 && y + 3 < height {
            RowKind::Cubic
        } else if y == 0 {
            RowKind::EdgeTop
        } else if y == height - 1 {
            RowKind::EdgeBottom
        } else {
            RowKind::Linear
        }
    }
}

/// Fixed 4-tap cubic kernel, coefficients sum to 1
#[inline]
pub fn cubic_interpolate(p0: u8, p1: u8, p2: u8, p3: u8) -> u8 {
    let v = -0.0625 * f64::from(p0) + 0.5625 * f64::from(p1) + 0.5625 * f64::from(p2)
        - 0.0625 * f64::from(p3);

    (v + 0.5).floor().clamp(0.0, 255.0) as u8
}

#[inline]
fn average(a: u8, b: u8) -> u8 {
    ((u16::from(a) + u16::from(b)) / 2) as u8
}

/// Write row `y` of the deinterlaced plane into `dst`
///
/// # Panics
///
/// If `dst` isn't exactly `src.width()` samples long or `kind` needs rows outside of `src`
#[inline]
pub fn reconstruct_row(src: &PlaneRef<'_>, y: usize, kind: RowKind, dst: &mut [u8]) {
    match kind {
        RowKind::Main => dst.copy_from_slice(src.row(y)),
        RowKind::EdgeTop => dst.copy_from_slice(src.row(y + 1)),
        RowKind::EdgeBottom => dst.copy_from_slice(src.row(y - 1)),
        RowKind::Linear => {
            let above = src.row(y - 1);
            let below = src.row(y + 1);

            assert_eq!(dst.len(), above.len());

            for ((dst, a), b) in dst.iter_mut().zip(above).zip(below) {
                *dst = average(*a, *b);
            }
        }
        RowKind::Cubic => {
            let r0 = src.row(y - 3);
            let r1 = src.row(y - 1);
            let r2 = src.row(y + 1);
            let r3 = src.row(y + 3);

            assert_eq!(dst.len(), r0.len());

            for (x, dst) in dst.iter_mut().enumerate() {
                *dst = cubic_interpolate(r0[x], r1[x], r2[x], r3[x]);
            }
        }
    }
}

/// Deinterlace a single plane, keeping `field` and rebuilding the other one
///
/// # Panics
///
/// If `src` and `dst` differ in width or height
pub fn deinterlace_plane(src: PlaneRef<'_>, mut dst: PlaneMut<'_>, field: Field) {
    assert_eq!(src.width(), dst.width());
    assert_eq!(src.height(), dst.height());

    let height = src.height();

    if src.width() == 0 {
        return;
    }

    for (y, dst_row) in dst.rows_mut().enumerate() {
        reconstruct_row(&src, y, RowKind::classify(y, height, field), dst_row);
    }
}
