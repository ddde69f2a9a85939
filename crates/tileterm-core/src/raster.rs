//! Raster primitives built on a single [`PixelTarget::plot`].
//!
//! Coordinates are pixels and are independent of the cell grid. Every
//! primitive accepts its corners in any order; degenerate shapes (zero
//! radius, zero-length lines) collapse to what they cover and are never an
//! error.

use crate::backend::PixelTarget;
use crate::color::Color;

/// Set one pixel.
#[inline]
pub fn draw_pixel<T: PixelTarget + ?Sized>(target: &mut T, x: i32, y: i32, color: Color) {
    target.plot(x, y, color);
}

/// Horizontal span from `x0` to `x1` inclusive, in either order.
pub fn draw_horiz_line<T: PixelTarget + ?Sized>(target: &mut T, x0: i32, x1: i32, y: i32, color: Color) {
    for x in x0.min(x1)..=x0.max(x1) {
        target.plot(x, y, color);
    }
}

/// Vertical span from `y0` to `y1` inclusive, in either order.
pub fn draw_vert_line<T: PixelTarget + ?Sized>(target: &mut T, x: i32, y0: i32, y1: i32, color: Color) {
    for y in y0.min(y1)..=y0.max(y1) {
        target.plot(x, y, color);
    }
}

/// Straight line between two points, both endpoints included.
///
/// Vertical segments go through [`draw_vert_line`]. Otherwise the line is
/// walked along its major axis with a DDA: the minor coordinate gathers
/// `|Δminor / Δmajor|` of error per step and moves one pixel towards the
/// end point whenever the error reaches one half.
pub fn draw_line<T: PixelTarget + ?Sized>(
    target: &mut T,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    if x0 == x1 {
        draw_vert_line(target, x0, y0, y1, color);
        return;
    }
    if (y1 - y0).abs() > (x1 - x0).abs() {
        dda(y0, x0, y1, x1, |y, x| target.plot(x, y, color));
    } else {
        dda(x0, y0, x1, y1, |x, y| target.plot(x, y, color));
    }
}

/// Steps `a` from the lower to the higher end, `b` following at most one
/// pixel per step. Requires `a0 != a1`.
fn dda(a0: i32, b0: i32, a1: i32, b1: i32, mut plot: impl FnMut(i32, i32)) {
    let (a0, b0, a1, b1) = if a0 > a1 { (a1, b1, a0, b0) } else { (a0, b0, a1, b1) };
    let deltaerr = ((b1 - b0) as f64 / (a1 - a0) as f64).abs();
    let step = (b1 - b0).signum();
    let mut error = 0.0;
    let mut b = b0;
    for a in a0..=a1 {
        plot(a, b);
        error += deltaerr;
        if error >= 0.5 {
            b += step;
            error -= 1.0;
        }
    }
}

/// Outline of the axis-aligned rectangle with corners `(x0, y0)` and
/// `(x1, y1)`. Every outline pixel is plotted exactly once.
pub fn draw_rect<T: PixelTarget + ?Sized>(
    target: &mut T,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    let (top, bottom) = (y0.min(y1), y0.max(y1));
    draw_horiz_line(target, x0, x1, top, color);
    if bottom != top {
        draw_horiz_line(target, x0, x1, bottom, color);
    }
    if bottom - top > 1 {
        draw_vert_line(target, x0, top + 1, bottom - 1, color);
        if x1 != x0 {
            draw_vert_line(target, x1, top + 1, bottom - 1, color);
        }
    }
}

/// Solid rectangle, one horizontal span per row.
pub fn fill_rect<T: PixelTarget + ?Sized>(
    target: &mut T,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    for y in y0.min(y1)..=y0.max(y1) {
        draw_horiz_line(target, x0, x1, y, color);
    }
}

/// Plots `(x, y)` offset from the centre, reflected into all four quadrants.
#[inline]
fn plot_four<T: PixelTarget + ?Sized>(target: &mut T, cx: i32, cy: i32, x: i32, y: i32, color: Color) {
    let (left, right) = (cx.saturating_sub(x), cx.saturating_add(x));
    let (top, bottom) = (cy.saturating_sub(y), cy.saturating_add(y));
    target.plot(right, bottom, color);
    target.plot(left, bottom, color);
    target.plot(right, top, color);
    target.plot(left, top, color);
}

/// Radius magnitude, saturating at `i32::MAX` for `i32::MIN`.
#[inline]
fn magnitude(r: i32) -> i32 {
    r.unsigned_abs().min(i32::MAX as u32) as i32
}

/// One-pixel outline of an axis-aligned ellipse (midpoint algorithm).
///
/// Region 1 covers the part of the quarter arc where the slope magnitude
/// is at most one and steps `x`; region 2 covers the rest and steps `y`.
/// Radii are taken as magnitudes. A zero radius degenerates to a line
/// (or to the centre pixel when both are zero).
pub fn draw_ellipse<T: PixelTarget + ?Sized>(
    target: &mut T,
    cx: i32,
    cy: i32,
    x_radius: i32,
    y_radius: i32,
    color: Color,
) {
    let (rx, ry) = (magnitude(x_radius), magnitude(y_radius));
    if rx == 0 || ry == 0 {
        if rx == 0 {
            draw_vert_line(target, cx, cy.saturating_sub(ry), cy.saturating_add(ry), color);
        } else {
            draw_horiz_line(target, cx.saturating_sub(rx), cx.saturating_add(rx), cy, color);
        }
        return;
    }

    let rx2 = (rx as f64) * (rx as f64);
    let ry2 = (ry as f64) * (ry as f64);

    let mut x = 0i32;
    let mut y = ry;
    let mut dx = 0.0;
    let mut dy = 2.0 * rx2 * y as f64;

    // Region 1: |slope| <= 1.
    let mut d1 = ry2 - rx2 * ry as f64 + 0.25 * rx2;
    while dx < dy {
        plot_four(target, cx, cy, x, y, color);
        x += 1;
        dx += 2.0 * ry2;
        if d1 < 0.0 {
            d1 += dx + ry2;
        } else {
            y -= 1;
            dy -= 2.0 * rx2;
            d1 += dx - dy + ry2;
        }
    }

    // Region 2: |slope| > 1.
    let xf = x as f64 + 0.5;
    let yf = (y - 1) as f64;
    let mut d2 = ry2 * xf * xf + rx2 * yf * yf - rx2 * ry2;
    let mut edge = x;
    while y >= 0 {
        plot_four(target, cx, cy, x, y, color);
        edge = x;
        y -= 1;
        dy -= 2.0 * rx2;
        if d2 > 0.0 {
            d2 += rx2 - dy;
        } else {
            x += 1;
            dx += 2.0 * ry2;
            d2 += dx - dy + rx2;
        }
    }

    // Flat ellipses leave region 2 before x reaches rx; finish the centre row.
    if edge < rx {
        let (near, far) = (edge.saturating_add(1), rx);
        draw_horiz_line(target, cx.saturating_add(near), cx.saturating_add(far), cy, color);
        draw_horiz_line(target, cx.saturating_sub(far), cx.saturating_sub(near), cy, color);
    }
}

/// Solid ellipse: every pixel of the bounding box whose normalized
/// distance `((x-cx)/rx)² + ((y-cy)/ry)²` is at most one, plus the
/// [`draw_ellipse`] outline so the fill always covers the outline.
pub fn fill_ellipse<T: PixelTarget + ?Sized>(
    target: &mut T,
    cx: i32,
    cy: i32,
    x_radius: i32,
    y_radius: i32,
    color: Color,
) {
    let (rx, ry) = (magnitude(x_radius), magnitude(y_radius));
    if rx > 0 && ry > 0 {
        let (rxf, ryf) = (rx as f64, ry as f64);
        for y in cy.saturating_sub(ry)..=cy.saturating_add(ry) {
            let ny = (y as f64 - cy as f64) / ryf;
            for x in cx.saturating_sub(rx)..=cx.saturating_add(rx) {
                let nx = (x as f64 - cx as f64) / rxf;
                if nx * nx + ny * ny <= 1.0 {
                    target.plot(x, y, color);
                }
            }
        }
    }
    draw_ellipse(target, cx, cy, rx, ry, color);
}
