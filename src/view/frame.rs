//! Frame abstraction for drawing primitives
//!
//! Wraps the ARGB pixel buffer and implements [`Canvas`]. Callers draw in
//! logical stage coordinates; the frame multiplies everything by its pixel
//! ratio. Shapes are rasterised from a signed distance to their edge, which
//! gives one pixel of anti-aliasing and, with a wider feather, the blurred
//! drop shadow.

use crate::canvas::{Canvas, Shadow};
use crate::color::Color;
use crate::point::Point;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). The alpha value from the
/// foreground color is ignored; `alpha` determines the blend ratio.
///
/// Returns the blended color with full opacity (alpha = 0xFF).
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// A filled shape in physical pixel coordinates
#[derive(Clone, Copy, Debug)]
enum Shape {
    Circle { center: Point, radius: f64 },
    Segment { from: Point, to: Point, half_width: f64 },
    Quad { corners: [Point; 4] },
}

impl Shape {
    fn translated(self, dx: f64, dy: f64) -> Shape {
        let shift = Point::new(dx, dy);
        match self {
            Shape::Circle { center, radius } => Shape::Circle {
                center: center.add(shift),
                radius,
            },
            Shape::Segment {
                from,
                to,
                half_width,
            } => Shape::Segment {
                from: from.add(shift),
                to: to.add(shift),
                half_width,
            },
            Shape::Quad { corners } => Shape::Quad {
                corners: corners.map(|c| c.add(shift)),
            },
        }
    }

    /// (min_x, min_y, max_x, max_y)
    fn bounds(&self) -> (f64, f64, f64, f64) {
        match *self {
            Shape::Circle { center, radius } => (
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            Shape::Segment {
                from,
                to,
                half_width,
            } => (
                from.x.min(to.x) - half_width,
                from.y.min(to.y) - half_width,
                from.x.max(to.x) + half_width,
                from.y.max(to.y) + half_width,
            ),
            Shape::Quad { corners } => corners.iter().fold(
                (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
                |(x0, y0, x1, y1), c| (x0.min(c.x), y0.min(c.y), x1.max(c.x), y1.max(c.y)),
            ),
        }
    }

    /// Signed distance from `p` to the shape's edge, positive inside
    fn inside_distance(&self, p: Point) -> f64 {
        match *self {
            Shape::Circle { center, radius } => radius - p.distance_to(center),
            Shape::Segment {
                from,
                to,
                half_width,
            } => half_width - distance_to_segment(p, from, to),
            Shape::Quad { corners } => {
                let area2: f64 = (0..4)
                    .map(|i| {
                        let a = corners[i];
                        let b = corners[(i + 1) % 4];
                        a.x * b.y - b.x * a.y
                    })
                    .sum();
                let orientation = if area2 < 0.0 { -1.0 } else { 1.0 };

                let mut nearest = f64::MAX;
                for i in 0..4 {
                    let a = corners[i];
                    let b = corners[(i + 1) % 4];
                    let edge = b.subtract(a);
                    let len = edge.distance_to(Point::ZERO);
                    if len <= f64::EPSILON {
                        continue;
                    }
                    let rel = p.subtract(a);
                    let cross = edge.x * rel.y - edge.y * rel.x;
                    nearest = nearest.min(orientation * cross / len);
                }
                nearest
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b.subtract(a);
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f64::EPSILON {
        return p.distance_to(a);
    }
    let ap = p.subtract(a);
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(a.add(ab.scale(t)))
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// Out-of-bounds drawing is clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    /// Physical pixels per logical unit
    scale: f64,
    background: u32,
    line_width: f64,
    shadow: Option<Shadow>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            // Buffer is smaller than expected - recalculate height to fit
            let adjusted_height = actual_size / width;
            (width, adjusted_height)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
            scale: 1.0,
            background: Color::WHITE.to_argb_u32(),
            line_width: 1.0,
            shadow: None,
        }
    }

    /// Set the device pixel ratio applied to every logical coordinate
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = if scale > 0.0 { scale } else { 1.0 };
        self
    }

    /// Set the colour `clear_rect` resets pixels to
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background.with_alpha(0xFF).to_argb_u32();
        self
    }

    /// Get the frame width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the frame height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Fill a rectangle specified by pixel coordinates
    pub fn fill_rect_px(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let x0 = x.min(self.width);
        let y0 = y.min(self.height);
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);

        for py in y0..y1 {
            let row_start = py * self.width;
            self.buffer[row_start + x0..row_start + x1].fill(color);
        }
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    #[inline]
    fn to_physical(&self, p: Point) -> Point {
        p.scale(self.scale)
    }

    /// Rasterise `shape` with an edge ramp `feather` pixels wide
    fn fill_shape(&mut self, shape: Shape, color: Color, feather: f64) {
        let opacity = color.a as f64 / 255.0;
        if opacity <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }

        let feather = feather.max(1.0);
        let (min_x, min_y, max_x, max_y) = shape.bounds();
        let pad = feather / 2.0 + 1.0;
        let x0 = (min_x - pad).floor().max(0.0) as usize;
        let y0 = (min_y - pad).floor().max(0.0) as usize;
        let x1 = ((max_x + pad).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((max_y + pad).ceil().max(0.0) as usize).min(self.height);

        let rgb = color.with_alpha(0xFF).to_argb_u32();
        for py in y0..y1 {
            for px in x0..x1 {
                let center = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                let coverage = (shape.inside_distance(center) / feather + 0.5).clamp(0.0, 1.0);
                let alpha = coverage * opacity;
                if alpha <= 0.0 {
                    continue;
                }
                let idx = py * self.width + px;
                self.buffer[idx] = if alpha >= 1.0 {
                    rgb
                } else {
                    blend_colors(self.buffer[idx], rgb, alpha as f32)
                };
            }
        }
    }

    /// Fill with the current shadow first, then the shape itself
    fn fill_with_shadow(&mut self, shape: Shape, color: Color) {
        if let Some(shadow) = self.shadow {
            let offset = self.to_physical(Point::new(shadow.offset_x, shadow.offset_y));
            self.fill_shape(
                shape.translated(offset.x, offset.y),
                shadow.color,
                shadow.blur * self.scale,
            );
        }
        self.fill_shape(shape, color, 1.0);
    }
}

impl Canvas for Frame<'_> {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let x0 = (x * self.scale).floor().max(0.0);
        let y0 = (y * self.scale).floor().max(0.0);
        let x1 = ((x + width) * self.scale).ceil().max(0.0);
        let y1 = ((y + height) * self.scale).ceil().max(0.0);
        let background = self.background;
        self.fill_rect_px(
            x0 as usize,
            y0 as usize,
            (x1 - x0).max(0.0) as usize,
            (y1 - y0).max(0.0) as usize,
            background,
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let shape = Shape::Circle {
            center: self.to_physical(center),
            radius: radius * self.scale,
        };
        self.fill_with_shadow(shape, color);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color) {
        let shape = Shape::Segment {
            from: self.to_physical(from),
            to: self.to_physical(to),
            half_width: self.line_width * self.scale / 2.0,
        };
        self.fill_shape(shape, color, 1.0);
    }

    fn fill_quad(&mut self, corners: [Point; 4], color: Color) {
        let shape = Shape::Quad {
            corners: corners.map(|c| self.to_physical(c)),
        };
        self.fill_with_shadow(shape, color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width.max(0.0);
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::rotated_rect;

    const RED: Color = Color::rgb(0xFF, 0, 0);

    #[test]
    fn test_frame_clear_rect_uses_background() {
        let mut buffer = vec![0u32; 20 * 20];
        let mut frame = Frame::new(&mut buffer, 20, 20).with_background(Color::rgb(1, 2, 3));
        frame.clear_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(frame.get_pixel(5, 5), 0xFF010203);
        assert_eq!(frame.get_pixel(15, 15), 0);
    }

    #[test]
    fn test_frame_fill_circle() {
        let mut buffer = vec![0xFFFFFFFF_u32; 40 * 40];
        let mut frame = Frame::new(&mut buffer, 40, 40);
        frame.fill_circle(Point::new(20.0, 20.0), 8.0, RED);
        assert_eq!(frame.get_pixel(20, 20), 0xFFFF0000);
        assert_eq!(frame.get_pixel(2, 2), 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(20, 35), 0xFFFFFFFF);
    }

    #[test]
    fn test_frame_stroke_line_respects_width() {
        let mut buffer = vec![0xFFFFFFFF_u32; 50 * 50];
        let mut frame = Frame::new(&mut buffer, 50, 50);
        frame.set_line_width(4.0);
        frame.stroke_line(Point::new(5.0, 25.0), Point::new(45.0, 25.0), RED);
        assert_eq!(frame.get_pixel(25, 24), 0xFFFF0000);
        assert_eq!(frame.get_pixel(25, 25), 0xFFFF0000);
        assert_eq!(frame.get_pixel(25, 30), 0xFFFFFFFF);
    }

    #[test]
    fn test_frame_fill_quad_either_winding() {
        let mut buffer = vec![0xFFFFFFFF_u32; 50 * 50];
        let mut frame = Frame::new(&mut buffer, 50, 50);
        let mut corners = rotated_rect(Point::new(10.0, 10.0), Point::ZERO, 20.0, 20.0, 0.0);
        frame.fill_quad(corners, RED);
        assert_eq!(frame.get_pixel(20, 20), 0xFFFF0000);
        assert_eq!(frame.get_pixel(40, 40), 0xFFFFFFFF);

        corners.reverse();
        let blue = Color::rgb(0, 0, 0xFF);
        frame.fill_quad(corners, blue);
        assert_eq!(frame.get_pixel(20, 20), 0xFF0000FF);
    }

    #[test]
    fn test_frame_scale_maps_logical_to_physical() {
        let mut buffer = vec![0xFFFFFFFF_u32; 40 * 40];
        let mut frame = Frame::new(&mut buffer, 40, 40).with_scale(2.0);
        frame.fill_circle(Point::new(10.0, 10.0), 3.0, RED);
        assert_eq!(frame.get_pixel(20, 20), 0xFFFF0000);
        assert_eq!(frame.get_pixel(10, 10), 0xFFFFFFFF);
    }

    #[test]
    fn test_frame_shadow_darkens_below_shape() {
        let mut buffer = vec![0xFFFFFFFF_u32; 60 * 60];
        let mut frame = Frame::new(&mut buffer, 60, 60);
        frame.set_shadow(Some(Shadow {
            offset_x: 0.0,
            offset_y: 10.0,
            blur: 2.0,
            color: Color::rgba(0, 0, 0, 0x80),
        }));
        let corners = rotated_rect(Point::new(10.0, 10.0), Point::ZERO, 20.0, 20.0, 0.0);
        frame.fill_quad(corners, RED);

        assert_eq!(frame.get_pixel(20, 20), 0xFFFF0000);
        let shadowed = frame.get_pixel(20, 35);
        let r = (shadowed >> 16) & 0xFF;
        assert!(r > 100 && r < 160, "R channel: {}", r);
        assert_eq!(frame.get_pixel(20, 55), 0xFFFFFFFF);
    }

    #[test]
    fn test_frame_out_of_bounds() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        // Shapes reaching past every edge are clipped
        frame.fill_circle(Point::new(-50.0, 500.0), 20.0, RED);
        frame.fill_quad(
            rotated_rect(Point::new(-100.0, -100.0), Point::ZERO, 500.0, 500.0, 33.0),
            RED,
        );
        frame.clear_rect(-5.0, -5.0, 100.0, 100.0);
        assert_eq!(frame.get_pixel(100, 100), 0);
    }

    #[test]
    fn test_frame_small_buffer_shrinks_height() {
        let mut buffer = vec![0u32; 10 * 5];
        let frame = Frame::new(&mut buffer, 10, 10);
        assert_eq!(frame.height(), 5);
    }
}
