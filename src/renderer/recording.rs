//! A [`DrawSurface`] that records every call instead of drawing

use std::convert::Infallible;

use super::surface::{DrawSurface, TextAlign, TextBaseline};

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    StrokeStyle(String),
    LineWidth(f64),
    Stroke,
    FillStyle(String),
    GlobalAlpha(f64),
    FillCircle { x: f64, y: f64, radius: f64 },
    Font(String),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    FillText { text: String, x: f64, y: f64 },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every `FillText` label, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every filled circle as `(x, y, radius)`
    pub fn circles(&self) -> Vec<(f64, f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::FillCircle { x, y, radius } => Some((x, y, radius)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(*c)).count()
    }
}

impl DrawSurface for RecordingSurface {
    type Error = Infallible;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeStyle(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::FillStyle(color.to_string()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::FillCircle { x, y, radius });
        Ok(())
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.commands.push(DrawCommand::TextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }
}
