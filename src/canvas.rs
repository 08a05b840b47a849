use crate::geometry::{Path, Point, Rect};
use crate::metrics::{FontFace, TextMetrics};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const INK: Color = Color::rgb(33, 37, 41);
    pub const MUTED: Color = Color::rgb(108, 117, 125);
    pub const BORDER: Color = Color::rgb(218, 222, 226);
    pub const STRIP: Color = Color::rgb(244, 246, 248);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Color),
    Stroke { color: Color, width: f32 },
    FillStroke { fill: Color, stroke: Color, width: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32, color: Color) -> Self {
        Self { face, size, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, paint: Paint },
    Path { path: Path, paint: Paint },
    Line { from: Point, to: Point, color: Color, width: f32 },
    // `x`/`y` is the left end of the baseline.
    Text { x: f32, y: f32, text: String, style: TextStyle },
    // The embedded brand logo, stretched to `rect`.
    Logo { rect: Rect },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

pub const A4_PORTRAIT: PageSize = PageSize {
    width: 595.28,
    height: 841.89,
};

/// One physical page: a fixed-size surface recording draw commands in order.
#[derive(Debug, Clone)]
pub struct Page {
    size: PageSize,
    commands: Vec<DrawCommand>,
}

impl Page {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn draw_rect(&mut self, rect: Rect, paint: Paint) {
        self.commands.push(DrawCommand::Rect { rect, paint });
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, radius: f32, paint: Paint) {
        self.commands.push(DrawCommand::Path {
            path: Path::rounded_rect(rect, radius),
            paint,
        });
    }

    pub fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn draw_logo(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Logo { rect });
    }

    /// Draws pre-wrapped text; nothing here breaks lines.
    pub fn draw_text(&mut self, x: f32, y: f32, text: impl Into<String>, style: TextStyle) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text { x, y, text, style });
    }

    /// Draws text inside a `max_width` slot starting at `x`. The width is only used to
    /// position right-aligned text so it ends exactly at `x + max_width`.
    pub fn draw_text_aligned<M>(
        &mut self,
        metrics: &M,
        x: f32,
        y: f32,
        text: &str,
        style: TextStyle,
        max_width: f32,
        align: Align,
    ) where
        M: TextMetrics + ?Sized,
    {
        let x = match align {
            Align::Left => x,
            Align::Right => x + max_width - metrics.width(style.face, style.size, text),
        };
        self.draw_text(x, y, text, style);
    }

    /// Text runs in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
