//! Copies RGBA frames into softbuffer's `0RGB` pixel format.

use image::{Rgba, RgbaImage};

#[inline]
pub(crate) fn pack_rgb(px: &Rgba<u8>) -> u32 {
    ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | (px[2] as u32)
}

/// Copy `frame` into the top-left of a `buf_width × buf_height` buffer.
/// Anything outside the frame is cleared to black.
pub(crate) fn blit_to_buffer(frame: &RgbaImage, buf: &mut [u32], buf_width: usize, buf_height: usize) {
    let src_w = frame.width() as usize;
    let src_h = frame.height() as usize;
    if buf_width > src_w || buf_height > src_h {
        buf.fill(0);
    }
    let copy_w = src_w.min(buf_width);
    let copy_h = src_h.min(buf_height);
    for (y, row) in frame.rows().take(copy_h).enumerate() {
        let start = y * buf_width;
        let Some(dst) = buf.get_mut(start..start + copy_w) else {
            break;
        };
        for (d, px) in dst.iter_mut().zip(row) {
            *d = pack_rgb(px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_zero_rgb() {
        assert_eq!(pack_rgb(&Rgba([0x12, 0x34, 0x56, 0xff])), 0x123456);
    }

    #[test]
    fn larger_buffer_is_cleared_around_frame() {
        let frame = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
        let mut buf = vec![7u32; 3 * 2];
        blit_to_buffer(&frame, &mut buf, 3, 2);
        assert_eq!(buf, vec![0xff0000, 0xff0000, 0, 0, 0, 0]);
    }

    #[test]
    fn smaller_buffer_crops() {
        let mut frame = RgbaImage::new(3, 3);
        frame.put_pixel(1, 1, Rgba([0, 0, 255, 255]));
        let mut buf = vec![0u32; 4];
        blit_to_buffer(&frame, &mut buf, 2, 2);
        assert_eq!(buf, vec![0, 0, 0, 0x0000ff]);
    }
}
