use super::font::{BitmapFont, GLYPH_WIDTH};
use super::image_data::Image;
use crate::app::geometry::{Point, Rect};

pub type Color = [u8; 4];

pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r, g, b, 255]
}

pub const fn with_alpha(color: Color, alpha: u8) -> Color {
    [color[0], color[1], color[2], alpha]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    frame: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.frame
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != self.size() {
            *self = Self::new(width, height);
        }
    }

    pub fn into_image(self) -> Image {
        Image::from_canvas_parts(self.width, self.height, self.frame)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let offset = self.offset_of(x, y)?;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.frame[offset..offset + 4]);
        Some(color)
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.blend_pixel(x, y, color);
            }
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32) {
        if thickness <= 0 || rect.is_empty() {
            return;
        }
        let t = thickness.min(rect.width / 2).min(rect.height / 2).max(1);
        let inner_height = rect.height - 2 * t;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.width, t), color);
        if inner_height > 0 {
            self.fill_rect(Rect::new(rect.x, rect.y + t, t, inner_height), color);
            self.fill_rect(
                Rect::new(rect.right() - t, rect.y + t, t, inner_height),
                color,
            );
        }
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: i32, color: Color) {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if rounded_rect_contains(rect, radius, x, y) {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: i32, color: Color, thickness: i32) {
        if thickness <= 0 {
            return;
        }
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        let inner = Rect::new(
            rect.x + thickness,
            rect.y + thickness,
            rect.width - 2 * thickness,
            rect.height - 2 * thickness,
        );
        let inner_radius = (radius - thickness).max(0);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                let in_outer = rounded_rect_contains(rect, radius, x, y);
                let in_inner = !inner.is_empty() && rounded_rect_contains(inner, inner_radius, x, y);
                if in_outer && !in_inner {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, center: Point, radius: i32, color: Color) {
        if radius <= 0 {
            return;
        }
        let limit = radius * radius + radius;
        for dy in -radius..=radius {
            let remaining = limit - dy * dy;
            if remaining < 0 {
                continue;
            }
            let half = (remaining as f32).sqrt() as i32;
            self.fill_span(center.y + dy, center.x - half, center.x + half + 1, color);
        }
    }

    pub fn stroke_circle(&mut self, center: Point, radius: i32, color: Color, thickness: i32) {
        if radius <= 0 || thickness <= 0 {
            return;
        }
        let inner_radius = radius - thickness;
        if inner_radius <= 0 {
            self.fill_circle(center, radius, color);
            return;
        }
        let outer_limit = radius * radius + radius;
        let inner_limit = inner_radius * inner_radius + inner_radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let d2 = dx * dx + dy * dy;
                if d2 <= outer_limit && d2 > inner_limit {
                    self.blend_pixel(center.x + dx, center.y + dy, color);
                }
            }
        }
    }

    pub fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        self.paint_ellipse(rect, None, color);
    }

    pub fn stroke_ellipse(&mut self, rect: Rect, color: Color, thickness: i32) {
        if thickness <= 0 {
            return;
        }
        self.paint_ellipse(rect, Some(thickness), color);
    }

    /// Even-odd scanline fill sampled at pixel centres.
    pub fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
        let max_y = points
            .iter()
            .map(|p| p.y)
            .max()
            .unwrap_or(0)
            .min(self.height as i32);
        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in min_y..max_y {
            let sample_y = y as f32 + 0.5;
            crossings.clear();
            for (index, start) in points.iter().enumerate() {
                let end = points[(index + 1) % points.len()];
                let (y0, y1) = (start.y as f32, end.y as f32);
                if (y0 <= sample_y && sample_y < y1) || (y1 <= sample_y && sample_y < y0) {
                    let t = (sample_y - y0) / (y1 - y0);
                    crossings.push(start.x as f32 + t * (end.x - start.x) as f32);
                }
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let from = (pair[0] - 0.5).ceil() as i32;
                let to = (pair[1] - 0.5).ceil() as i32;
                self.fill_span(y, from, to, color);
            }
        }
    }

    pub fn stroke_polygon(&mut self, points: &[Point], color: Color, thickness: i32) {
        for (index, start) in points.iter().enumerate() {
            let end = points[(index + 1) % points.len()];
            self.draw_line(*start, end, color, thickness);
        }
    }

    pub fn draw_line(&mut self, from: Point, to: Point, color: Color, thickness: i32) {
        let thickness = thickness.max(1);
        let half = thickness / 2;
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let step_x = if from.x < to.x { 1 } else { -1 };
        let step_y = if from.y < to.y { 1 } else { -1 };
        let mut error = dx + dy;
        let (mut x, mut y) = (from.x, from.y);
        loop {
            if thickness == 1 {
                self.blend_pixel(x, y, color);
            } else {
                self.fill_rect(Rect::new(x - half, y - half, thickness, thickness), color);
            }
            if x == to.x && y == to.y {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
    }

    pub fn draw_image(&mut self, image: &Image, top_left: Point) {
        let dest = Rect::new(
            top_left.x,
            top_left.y,
            image.width() as i32,
            image.height() as i32,
        );
        let Some(clipped) = dest.intersection(&self.bounds()) else {
            return;
        };
        let src = image.as_bytes();
        let stride = image.width() as usize * 4;
        for y in clipped.y..clipped.bottom() {
            let row = (y - top_left.y) as usize * stride;
            for x in clipped.x..clipped.right() {
                let offset = row + (x - top_left.x) as usize * 4;
                let color = [
                    src[offset],
                    src[offset + 1],
                    src[offset + 2],
                    src[offset + 3],
                ];
                self.blend_pixel(x, y, color);
            }
        }
    }

    pub fn draw_image_centered(&mut self, image: &Image, center: Point) {
        let top_left = center.offset(-(image.width() as i32) / 2, -(image.height() as i32) / 2);
        self.draw_image(image, top_left);
    }

    /// Nearest-neighbour scale into `dest`.
    pub fn draw_image_scaled(&mut self, image: &Image, dest: Rect) {
        if dest.is_empty() || image.width() == 0 || image.height() == 0 {
            return;
        }
        if dest.width == image.width() as i32 && dest.height == image.height() as i32 {
            self.draw_image(image, dest.top_left());
            return;
        }
        let Some(clipped) = dest.intersection(&self.bounds()) else {
            return;
        };
        let src = image.as_bytes();
        let (src_w, src_h) = (image.width() as i64, image.height() as i64);
        for y in clipped.y..clipped.bottom() {
            let sy = ((y - dest.y) as i64 * src_h / dest.height as i64).min(src_h - 1);
            for x in clipped.x..clipped.right() {
                let sx = ((x - dest.x) as i64 * src_w / dest.width as i64).min(src_w - 1);
                let offset = ((sy * src_w + sx) * 4) as usize;
                let color = [
                    src[offset],
                    src[offset + 1],
                    src[offset + 2],
                    src[offset + 3],
                ];
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Characters without a glyph advance like a space.
    pub fn draw_text(&mut self, font: BitmapFont, text: &str, top_left: Point, color: Color) {
        let scale = font.scale() as i32;
        let mut x = top_left.x;
        for ch in text.chars() {
            if let Some(rows) = BitmapFont::glyph_rows(ch) {
                for (row_index, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                            continue;
                        }
                        self.fill_rect(
                            Rect::new(
                                x + col as i32 * scale,
                                top_left.y + row_index as i32 * scale,
                                scale,
                                scale,
                            ),
                            color,
                        );
                    }
                }
            }
            x += font.advance() as i32;
        }
    }

    pub fn draw_text_centered(&mut self, font: BitmapFont, text: &str, center: Point, color: Color) {
        let (width, height) = font.measure(text);
        let top_left = center.offset(-(width as i32) / 2, -(height as i32) / 2);
        self.draw_text(font, text, top_left, color);
    }

    fn paint_ellipse(&mut self, rect: Rect, thickness: Option<i32>, color: Color) {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        let cx = rect.x as f32 + rect.width as f32 / 2.0;
        let cy = rect.y as f32 + rect.height as f32 / 2.0;
        let a = rect.width as f32 / 2.0;
        let b = rect.height as f32 / 2.0;
        let inner = thickness.map(|t| (a - t as f32, b - t as f32));
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                let px = x as f32 + 0.5 - cx;
                let py = y as f32 + 0.5 - cy;
                if !inside_ellipse(px, py, a, b) {
                    continue;
                }
                if let Some((ia, ib)) = inner {
                    if ia > 0.0 && ib > 0.0 && inside_ellipse(px, py, ia, ib) {
                        continue;
                    }
                }
                self.blend_pixel(x, y, color);
            }
        }
    }

    fn fill_span(&mut self, y: i32, from_x: i32, to_x: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        for x in from_x.max(0)..to_x.min(self.width as i32) {
            self.blend_pixel(x, y, color);
        }
    }

    fn offset_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(offset) = self.offset_of(x, y) else {
            return;
        };
        let alpha = color[3] as u32;
        if alpha == 0 {
            return;
        }
        let dst = &mut self.frame[offset..offset + 4];
        if alpha == 255 {
            dst.copy_from_slice(&color);
            return;
        }
        let inverse = 255 - alpha;
        let dst_alpha = dst[3] as u32;
        let out_alpha = (alpha + (dst_alpha * inverse + 127) / 255).min(255);
        let denominator = out_alpha * 255;
        for channel in 0..3 {
            let numerator =
                color[channel] as u32 * alpha * 255 + dst[channel] as u32 * dst_alpha * inverse;
            dst[channel] = ((numerator + denominator / 2) / denominator).min(255) as u8;
        }
        dst[3] = out_alpha as u8;
    }
}

fn inside_ellipse(px: f32, py: f32, a: f32, b: f32) -> bool {
    if a <= 0.0 || b <= 0.0 {
        return false;
    }
    (px / a).powi(2) + (py / b).powi(2) <= 1.0
}

fn rounded_rect_contains(rect: Rect, radius: i32, x: i32, y: i32) -> bool {
    if !rect.contains(Point::new(x, y)) {
        return false;
    }
    let r = radius.min(rect.width / 2).min(rect.height / 2).max(0);
    if r == 0 {
        return true;
    }
    let px = x as f32 + 0.5;
    let py = y as f32 + 0.5;
    let left = (rect.x + r) as f32;
    let right = (rect.right() - r) as f32;
    let top = (rect.y + r) as f32;
    let bottom = (rect.bottom() - r) as f32;
    let corner_x = if px < left {
        left
    } else if px > right {
        right
    } else {
        return true;
    };
    let corner_y = if py < top {
        top
    } else if py > bottom {
        bottom
    } else {
        return true;
    };
    let (dx, dy) = (px - corner_x, py - corner_y);
    dx * dx + dy * dy <= (r * r) as f32
}
