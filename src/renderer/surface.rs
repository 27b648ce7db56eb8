//! Drawing surface abstraction
//!
//! The handful of 2D-context operations the scene needs. The browser build
//! implements it over `CanvasRenderingContext2d`; tests and the native run use
//! [`super::RecordingSurface`].

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "middle",
        }
    }
}

/// Immediate-mode 2D drawing target
pub trait DrawSurface {
    type Error;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn stroke(&mut self);

    fn set_fill_style(&mut self, color: &str);
    fn set_global_alpha(&mut self, alpha: f64);
    /// Filled circle as its own path
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), Self::Error>;

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
}
