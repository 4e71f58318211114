//! Draw list produced by the presentation adapter
//!
//! A `Scene` is everything one frame needs: the draw commands in paint order
//! plus the post-process parameters. Building it never touches sim state
//! mutably; turning it into GPU work happens in `shapes` and `pipeline`.

use glam::Vec2;

use crate::Color;
use crate::palette;
use crate::sim::Rect;

/// How text is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEffect {
    Plain,
    /// Hue cycles across the screen and over time (victory banner)
    Rainbow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Player sprite sheet blit. A negative `src.w` mirrors horizontally.
    Sprite {
        src: Rect,
        dst: Rect,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        /// Glyph height in pixels
        size: f32,
        color: Color,
        effect: TextEffect,
    },
}

/// Post-process pass parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostFx {
    /// Seconds since the game started, fed to the shaders as a uniform
    pub time: f32,
    /// Darken alternate lines on composite
    pub scanlines: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub clear: Color,
    pub commands: Vec<DrawCommand>,
    pub post: PostFx,
}

impl Scene {
    pub fn new(time: f32) -> Self {
        Self {
            clear: palette::CRT_BLACK,
            commands: Vec::new(),
            post: PostFx {
                time,
                scanlines: true,
            },
        }
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn sprite(&mut self, src: Rect, dst: Rect) {
        self.commands.push(DrawCommand::Sprite { src, dst });
    }

    pub fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color, effect: TextEffect) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
            effect,
        });
    }
}
