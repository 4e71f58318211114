//! Shape generation for 2D primitives
//!
//! Turns a `Scene` into a flat triangle list in screen pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::font;
use super::scene::{DrawCommand, Scene, TextEffect};
use super::sprites;
use super::vertex::{Vertex, effect, to_linear};
use crate::sim::Rect;

/// Segments used for bubble and ball outlines
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Append two triangles covering an axis-aligned quad
fn push_quad(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4], fx: f32) {
    let (x0, y0, x1, y1) = (x, y, x + w, y + h);
    out.push(Vertex::new(x0, y0, color).with_effect(fx));
    out.push(Vertex::new(x1, y0, color).with_effect(fx));
    out.push(Vertex::new(x0, y1, color).with_effect(fx));

    out.push(Vertex::new(x0, y1, color).with_effect(fx));
    out.push(Vertex::new(x1, y0, color).with_effect(fx));
    out.push(Vertex::new(x1, y1, color).with_effect(fx));
}

/// Generate vertices for a filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, r.x, r.y, r.w, r.h, color, effect::FLAT);
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a string in the built-in bitmap font
pub fn text(s: &str, x: f32, y: f32, size: f32, color: [f32; 4], fx: TextEffect) -> Vec<Vertex> {
    let unit = font::unit(size);
    let fx = match fx {
        TextEffect::Plain => effect::FLAT,
        TextEffect::Rainbow => effect::RAINBOW,
    };

    let mut vertices = Vec::new();
    for (col, row) in font::lit_cells(s) {
        push_quad(&mut vertices, x + col * unit, y + row * unit, unit, unit, color, fx);
    }
    vertices
}

/// Generate vertices for a sprite sheet blit
///
/// Each opaque sheet pixel becomes one quad scaled into `dst`. A negative
/// source width walks the sheet right to left, mirroring the frame.
pub fn sprite(src: &Rect, dst: &Rect) -> Vec<Vertex> {
    let cols = src.w.abs().round() as i32;
    let rows = src.h.abs().round() as i32;
    if cols == 0 || rows == 0 {
        return Vec::new();
    }

    let cell_w = dst.w / cols as f32;
    let cell_h = dst.h / rows as f32;
    let step = src.w.signum();
    // Mirrored rects start one past the last column
    let start = if step < 0.0 { src.x - 1.0 } else { src.x };

    let mut vertices = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let sx = start + step * col as f32;
            let sy = src.y + row as f32;
            if sx < 0.0 || sy < 0.0 {
                continue;
            }
            if let Some(color) = sprites::sheet_pixel(sx as usize, sy as usize) {
                push_quad(
                    &mut vertices,
                    dst.x + col as f32 * cell_w,
                    dst.y + row as f32 * cell_h,
                    cell_w,
                    cell_h,
                    to_linear(color),
                    effect::FLAT,
                );
            }
        }
    }
    vertices
}

/// Tessellate a whole scene in paint order
pub fn tessellate(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for cmd in &scene.commands {
        match cmd {
            DrawCommand::Rect { rect: r, color } => vertices.extend(rect(r, to_linear(*color))),
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, to_linear(*color), CIRCLE_SEGMENTS)),
            DrawCommand::Sprite { src, dst } => vertices.extend(sprite(src, dst)),
            DrawCommand::Text {
                text: s,
                x,
                y,
                size,
                color,
                effect: fx,
            } => vertices.extend(text(s, *x, *y, *size, to_linear(*color), *fx)),
        }
    }
    vertices
}
