//! Pixel helpers over `RgbaImage`: solid fills, scaled alpha blits,
//! tinting and whole-frame scaling.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{GenericImageView, Rgba, RgbaImage};
use tileterm_core::{Color, Range};

/// Opaque pixel of the given colour.
#[inline]
pub fn opaque(c: Color) -> Rgba<u8> {
    Rgba(c.to_rgba(255))
}

/// The part of `r` that lies on `img`.
#[inline]
pub fn clip(img: &RgbaImage, r: Range) -> Range {
    r.intersect(Range::new(0, 0, img.width() as i32, img.height() as i32))
}

/// Fill `area` (clipped to the image) with an opaque colour.
pub fn fill_rect(img: &mut RgbaImage, area: Range, color: Color) {
    let px = opaque(color);
    for p in clip(img, area) {
        img.put_pixel(p.x as u32, p.y as u32, px);
    }
}

/// Source-over blend of `src` onto `dst`.
#[inline]
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let a = src[3] as u32;
    match a {
        0 => dst,
        255 => src,
        _ => {
            let inv = 255 - a;
            let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv) / 255) as u8;
            let out_a = a + dst[3] as u32 * inv / 255;
            Rgba([mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2]), out_a as u8])
        }
    }
}

/// Multiply tint: each colour channel scaled by the tint's, alpha kept.
#[inline]
pub fn tint_multiply(px: Rgba<u8>, tint: Color) -> Rgba<u8> {
    let m = |s: u8, t: u8| ((s as u32 * t as u32) / 255) as u8;
    Rgba([m(px[0], tint.r()), m(px[1], tint.g()), m(px[2], tint.b()), px[3]])
}

/// The "atop" tint of a glyph: the tint colour wherever the source is
/// opaque, carrying the source's alpha, transparent elsewhere.
pub fn tint_atop<I>(src: &I, tint: Color) -> RgbaImage
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::from_pixel(w, h, opaque(tint));
    for (x, y, px) in out.enumerate_pixels_mut() {
        px[3] = src.get_pixel(x, y)[3];
    }
    out
}

/// Nearest-neighbour scale `src` into `dest` on `dst`, passing every
/// source pixel through `map` and blending it over what is there.
pub fn blit_over<I, F>(dst: &mut RgbaImage, src: &I, dest: Range, map: F)
where
    I: GenericImageView<Pixel = Rgba<u8>>,
    F: Fn(Rgba<u8>) -> Rgba<u8>,
{
    let (sw, sh) = src.dimensions();
    let (dw, dh) = (dest.width(), dest.height());
    if sw == 0 || sh == 0 || dw <= 0 || dh <= 0 {
        return;
    }
    for p in clip(dst, dest) {
        let sx = ((p.x - dest.min.x) as u64 * sw as u64 / dw as u64) as u32;
        let sy = ((p.y - dest.min.y) as u64 * sh as u64 / dh as u64) as u32;
        let px = map(src.get_pixel(sx, sy));
        let under = *dst.get_pixel(p.x as u32, p.y as u32);
        dst.put_pixel(p.x as u32, p.y as u32, blend_over(under, px));
    }
}

/// Scale a frame by the device pixel ratio (nearest neighbour). Ratios
/// that leave the size unchanged borrow the frame.
pub fn scale_frame(frame: &RgbaImage, ratio: f64) -> Cow<'_, RgbaImage> {
    let w = ((frame.width() as f64 * ratio).round() as u32).max(1);
    let h = ((frame.height() as f64 * ratio).round() as u32).max(1);
    if (w, h) == frame.dimensions() {
        Cow::Borrowed(frame)
    } else {
        Cow::Owned(imageops::resize(frame, w, h, FilterType::Nearest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_image() {
        let mut img = RgbaImage::new(4, 4);
        fill_rect(&mut img, Range::new(2, 2, 10, 10), Color::RED);
        assert_eq!(*img.get_pixel(3, 3), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(1, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn blend_over_extremes() {
        let d = Rgba([10, 20, 30, 255]);
        assert_eq!(blend_over(d, Rgba([1, 2, 3, 0])), d);
        assert_eq!(blend_over(d, Rgba([1, 2, 3, 255])), Rgba([1, 2, 3, 255]));
        let half = blend_over(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
        assert_eq!(half[3], 255);
        assert!(half[0] > 120 && half[0] < 135);
    }

    #[test]
    fn atop_tint_keeps_silhouette() {
        let mut glyph = RgbaImage::new(2, 1);
        glyph.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        let t = tint_atop(&glyph, Color::GREEN);
        assert_eq!(*t.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(t.get_pixel(1, 0)[3], 0);
    }

    #[test]
    fn multiply_tint_on_white_is_the_tint() {
        assert_eq!(
            tint_multiply(Rgba([255, 255, 255, 200]), Color::from_rgb(10, 20, 30)),
            Rgba([10, 20, 30, 200])
        );
    }

    #[test]
    fn blit_scales_nearest() {
        let mut src = RgbaImage::new(2, 2);
        src.put_pixel(1, 1, Rgba([9, 9, 9, 255]));
        let mut dst = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        blit_over(&mut dst, &src, Range::new(0, 0, 4, 4), |p| p);
        for (x, y) in [(2, 2), (3, 3), (2, 3), (3, 2)] {
            assert_eq!(*dst.get_pixel(x, y), Rgba([9, 9, 9, 255]));
        }
        assert_eq!(*dst.get_pixel(1, 1), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn scale_frame_borrows_at_ratio_one() {
        let f = RgbaImage::new(8, 4);
        assert!(matches!(scale_frame(&f, 1.0), Cow::Borrowed(_)));
        assert_eq!(scale_frame(&f, 2.0).dimensions(), (16, 8));
        assert_eq!(scale_frame(&f, 1.5).dimensions(), (12, 6));
    }
}
