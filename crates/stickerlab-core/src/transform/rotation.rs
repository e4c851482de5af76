//! Sticker rotation with bilinear and Lanczos3 interpolation.
//!
//! The output canvas grows to hold every rotated corner and anything outside
//! the rotated source is fully transparent.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source pixel(s) contribute to it and interpolate
//! their values. Sampling happens on pixel centres, in premultiplied alpha,
//! with taps outside the source treated as transparent so the sticker's
//! outer edge fades out instead of being cut off.
//!
//! With image rows growing downward, a visually counter-clockwise rotation
//! by θ has the inverse transform:
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + src_cx
//! src_y = dx * sin(θ) + dy * cos(θ) + src_cy
//! ```

use serde::{Deserialize, Serialize};

use crate::raster::Raster;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation.
    Lanczos3,
}

/// Angles closer than this to a right angle take the exact path.
const ANGLE_EPSILON: f64 = 0.001;

/// Exact quarter turns, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuarterTurn {
    None,
    Ccw90,
    Half,
    Ccw270,
}

fn quarter_turn(angle_degrees: f64) -> Option<QuarterTurn> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let near = |target: f64| (normalized - target).abs() < ANGLE_EPSILON;
    if near(0.0) || near(360.0) {
        Some(QuarterTurn::None)
    } else if near(90.0) {
        Some(QuarterTurn::Ccw90)
    } else if near(180.0) {
        Some(QuarterTurn::Half)
    } else if near(270.0) {
        Some(QuarterTurn::Ccw270)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds.
/// This returns the smallest whole-pixel box that contains every corner.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turn(angle_degrees) {
        Some(QuarterTurn::None | QuarterTurn::Half) => return (width, height),
        Some(QuarterTurn::Ccw90 | QuarterTurn::Ccw270) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // The bounding box of a rotated rectangle is:
    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    // Shave a hair before ceil so float noise doesn't add a whole pixel.
    let new_w = (w * cos + h * sin - 1e-6).ceil() as u32;
    let new_h = (w * sin + h * cos - 1e-6).ceil() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate a raster around its centre.
///
/// The output is always RGBA and is expanded to fit the whole rotated image.
///
/// # Arguments
///
/// * `image` - Source raster
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `filter` - Interpolation method for arbitrary angles
pub fn apply_rotation(image: &Raster, angle_degrees: f64, filter: InterpolationFilter) -> Raster {
    let rgba = image.to_rgba();

    if let Some(turn) = quarter_turn(angle_degrees) {
        return rotate_exact(rgba, turn);
    }
    if rgba.is_empty() {
        return rgba;
    }

    let (dst_w, dst_h) = compute_rotated_bounds(rgba.width, rgba.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Centers of source and destination images
    let src_cx = rgba.width as f64 / 2.0;
    let src_cy = rgba.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * 4];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Pixel centre relative to the destination centre
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            // Back to source pixel-index space
            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            let pixel = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(&rgba, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(&rgba, src_x, src_y),
            };

            let idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 4;
            output[idx..idx + 4].copy_from_slice(&pixel);
        }
    }

    Raster::from_rgba_parts(dst_w, dst_h, output)
}

fn rotate_exact(image: Raster, turn: QuarterTurn) -> Raster {
    if turn == QuarterTurn::None {
        return image;
    }
    let Some(img) = image::RgbaImage::from_raw(image.width, image.height, image.pixels) else {
        return Raster::transparent(0, 0);
    };
    // The image crate's rotate90 turns clockwise.
    let rotated = match turn {
        QuarterTurn::Ccw90 => image::imageops::rotate270(&img),
        QuarterTurn::Half => image::imageops::rotate180(&img),
        QuarterTurn::Ccw270 => image::imageops::rotate90(&img),
        QuarterTurn::None => img,
    };
    Raster::from_rgba_image(rotated)
}

/// Premultiplied RGBA tap, transparent outside the image.
#[inline]
fn tap(image: &Raster, px: i64, py: i64) -> [f64; 4] {
    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        return [0.0; 4];
    }
    let idx = (py as usize * image.width as usize + px as usize) * 4;
    let p = &image.pixels[idx..idx + 4];
    let a = p[3] as f64 / 255.0;
    [p[0] as f64 * a, p[1] as f64 * a, p[2] as f64 * a, p[3] as f64]
}

/// Turn an accumulated premultiplied sample back into straight RGBA.
#[inline]
fn finish(sum: [f64; 4]) -> [u8; 4] {
    let alpha = sum[3].clamp(0.0, 255.0);
    if alpha < 0.5 {
        return [0, 0, 0, 0];
    }
    let scale = 255.0 / alpha;
    [
        (sum[0] * scale).clamp(0.0, 255.0).round() as u8,
        (sum[1] * scale).clamp(0.0, 255.0).round() as u8,
        (sum[2] * scale).clamp(0.0, 255.0).round() as u8,
        alpha.round() as u8,
    ]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
fn sample_bilinear(image: &Raster, x: f64, y: f64) -> [u8; 4] {
    // Fully outside, including the half-pixel fade band
    if x <= -1.0 || y <= -1.0 || x >= image.width as f64 || y >= image.height as f64 {
        return [0, 0, 0, 0];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = tap(image, x0, y0);
    let p10 = tap(image, x0 + 1, y0);
    let p01 = tap(image, x0, y0 + 1);
    let p11 = tap(image, x0 + 1, y0 + 1);

    let mut sum = [0.0f64; 4];
    for i in 0..4 {
        sum[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }
    finish(sum)
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Lanczos3 considers a 6x6 neighborhood of pixels, providing
/// higher quality results especially for sharp edges.
fn sample_lanczos3(image: &Raster, x: f64, y: f64) -> [u8; 4] {
    if x <= -3.0 || y <= -3.0 || x >= image.width as f64 + 2.0 || y >= image.height as f64 + 2.0 {
        return [0, 0, 0, 0];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    // Sample 6x6 neighborhood
    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

            let pixel = tap(image, px, py);
            for i in 0..4 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return [0, 0, 0, 0];
    }
    for value in &mut sum {
        *value /= weight_sum;
    }
    // Negative lobes can push colour above alpha; keep premultiplied values valid.
    for i in 0..3 {
        sum[i] = sum[i].clamp(0.0, sum[3].max(0.0));
    }
    finish(sum)
}

/// Lanczos kernel weight function.
///
/// The Lanczos kernel is defined as:
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
///
/// where sinc(x) = sin(πx) / (πx)
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
