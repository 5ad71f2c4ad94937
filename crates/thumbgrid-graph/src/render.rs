//! The capability the gallery needs from whatever draws it.

use crate::geometry::{Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

pub mod palette {
    use super::Color;

    pub const SLOT_BACKGROUND: Color = Color::rgb(0x22, 0x22, 0x22);
    pub const PENDING_FILL: Color = Color::rgba(180, 0, 0, 102);
    pub const PENDING_CROSS: Color = Color::rgba(180, 0, 0, 230);
    pub const DELETE_BUTTON: Color = Color::rgba(180, 0, 0, 230);
    pub const ICON: Color = Color::rgb(255, 255, 255);
    pub const SELECTION: Color = Color::rgb(0x3f, 0xa7, 0xff);
}

/// Drawing primitives, in widget-local coordinates.
pub trait RenderSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw the image decoded from `source` stretched over `rect`. Callers
    /// pass an already aspect-fitted rect.
    fn draw_image(&mut self, source: &str, rect: Rect);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);

    /// Both diagonals of `rect`.
    fn stroke_cross(&mut self, rect: Rect, color: Color, width: f32) {
        self.stroke_line(rect.min, rect.max, color, width);
        self.stroke_line(
            Vec2::new(rect.max.x, rect.min.y),
            Vec2::new(rect.min.x, rect.max.y),
            color,
            width,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Image {
        source: String,
        rect: Rect,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: f32,
    },
}

/// Surface that records commands instead of drawing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn images(&self) -> impl Iterator<Item = (&str, Rect)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Image { source, rect } => Some((source.as_str(), *rect)),
            _ => None,
        })
    }

    pub fn filled_with(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn stroked_with(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokeRect { rect, color: c, .. } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_image(&mut self, source: &str, rect: Rect) {
        self.commands.push(DrawCommand::Image {
            source: source.to_string(),
            rect,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            width,
        });
    }
}
