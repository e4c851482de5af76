//! Alpha compositing of sticker bitmaps onto the base image.
//!
//! Every layer is blended with the Porter-Duff "over" operator in straight
//! alpha. Stickers are pasted in the order given: a later sticker covers an
//! earlier one wherever both are opaque. Pixels that fall outside the base
//! image are clipped, so a sticker may hang off any edge.

use crate::raster::Raster;
use crate::transform::RenderedOverlay;

/// Blend a straight-alpha `src` pixel over `dst`.
#[inline]
pub fn blend_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = dst[3] as u32;

    // Output alpha scaled by 255 * 255
    let dst_weight = da * (255 - sa);
    let out_a = sa * 255 + dst_weight;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mix = |s: u8, d: u8| -> u8 {
        let num = s as u32 * sa * 255 + d as u32 * dst_weight;
        ((num + out_a / 2) / out_a).min(255) as u8
    };
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        ((out_a + 127) / 255).min(255) as u8,
    ]
}

/// Paste `overlay` with its top-left corner at `anchor`. The result is RGBA
/// and keeps the background's dimensions.
pub fn paste(background: &Raster, overlay: &Raster, anchor: (i32, i32)) -> Raster {
    let mut out = background.to_rgba();
    paste_into(&mut out, overlay, anchor);
    out
}

/// Paste overlays in order onto `background`.
pub fn paste_all(background: &Raster, overlays: &[RenderedOverlay]) -> Raster {
    let mut out = background.to_rgba();
    for overlay in overlays {
        paste_into(&mut out, &overlay.bitmap, overlay.anchor);
    }
    out
}

/// Blend `overlay` into an RGBA canvas, clipping to the canvas bounds.
fn paste_into(canvas: &mut Raster, overlay: &Raster, anchor: (i32, i32)) {
    let src = overlay.to_rgba();
    let (ax, ay) = (anchor.0 as i64, anchor.1 as i64);
    let (cw, ch) = (canvas.width as i64, canvas.height as i64);

    // Intersection of the overlay rectangle with the canvas
    let x0 = ax.max(0);
    let y0 = ay.max(0);
    let x1 = (ax + src.width as i64).min(cw);
    let y1 = (ay + src.height as i64).min(ch);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for y in y0..y1 {
        let sy = (y - ay) as usize;
        for x in x0..x1 {
            let sx = (x - ax) as usize;
            let si = (sy * src.width as usize + sx) * 4;
            let di = (y as usize * canvas.width as usize + x as usize) * 4;

            let s = [
                src.pixels[si],
                src.pixels[si + 1],
                src.pixels[si + 2],
                src.pixels[si + 3],
            ];
            if s[3] == 0 {
                continue;
            }
            let d = [
                canvas.pixels[di],
                canvas.pixels[di + 1],
                canvas.pixels[di + 2],
                canvas.pixels[di + 3],
            ];
            canvas.pixels[di..di + 4].copy_from_slice(&blend_over(d, s));
        }
    }
}
