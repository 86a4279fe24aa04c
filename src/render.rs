//! Content rendering
//!
//! The alert core only needs one capability from rendering: put this content
//! into the window and report how big it turned out. [`LayoutRenderer`] is the
//! stock implementation; it stacks an icon, a label and a progress bar using
//! the style's [`Metrics`] and hands the result to the window to draw.

use crate::content::{Content, Symbol};
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::style::AlertStyle;
use crate::ui::OverlayWindow;

/// RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const HUD_DARK: Color = Color::rgba(0.12, 0.12, 0.13, 0.85);
    pub const HUD_LIGHT: Color = Color::rgba(0.93, 0.93, 0.94, 0.9);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Pack as `0x00RRGGBB` after premultiplying by alpha (black background)
    pub fn to_rgb_u32(self) -> u32 {
        let channel = |v: f32| ((v * self.a).clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Style-specific layout parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub axis: Axis,
    pub padding: f32,
    pub spacing: f32,
    pub icon_size: f32,
    pub font_size: f32,
    pub progress_size: Size,
    pub min_size: Size,
    pub foreground: Color,
    pub background: Color,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            padding: 20.0,
            spacing: 12.0,
            icon_size: 80.0,
            font_size: 16.0,
            progress_size: Size::new(160.0, 8.0),
            min_size: Size::new(200.0, 200.0),
            foreground: Color::WHITE,
            background: Color::HUD_DARK,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Icon { symbol: Symbol, frame: Rect },
    Label { text: String, frame: Rect, font_size: f32 },
    ProgressBar { frame: Rect, value: f32 },
}

impl LayoutElement {
    pub fn frame(&self) -> Rect {
        match self {
            LayoutElement::Icon { frame, .. }
            | LayoutElement::Label { frame, .. }
            | LayoutElement::ProgressBar { frame, .. } => *frame,
        }
    }
}

/// Positioned content in window coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLayout {
    pub size: Size,
    pub elements: Vec<LayoutElement>,
    pub foreground: Color,
    pub background: Color,
}

/// Renders content into an alert window
pub trait ContentRenderer: Send + Sync {
    /// Draw `content` into `window` and return the size it needs
    fn render(
        &self,
        content: &Content,
        style: &dyn AlertStyle,
        window: &mut dyn OverlayWindow,
    ) -> Result<Size>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutRenderer;

impl ContentRenderer for LayoutRenderer {
    fn render(
        &self,
        content: &Content,
        style: &dyn AlertStyle,
        window: &mut dyn OverlayWindow,
    ) -> Result<Size> {
        let layout = layout(content, &style.metrics());
        window.draw(&layout);
        Ok(layout.size)
    }
}

// Rough average glyph advance relative to the font size
const GLYPH_ADVANCE: f32 = 0.55;
const LINE_HEIGHT: f32 = 1.3;

fn measure_text(text: &str, font_size: f32) -> Size {
    let glyphs = text.chars().count() as f32;
    Size::new(
        (glyphs * font_size * GLYPH_ADVANCE).ceil(),
        (font_size * LINE_HEIGHT).ceil(),
    )
}

enum Part {
    Icon(Symbol),
    Label(String),
    Progress(f32),
}

/// Lay out `content` along the metrics' axis, centered in a window at least `min_size`
pub fn layout(content: &Content, metrics: &Metrics) -> ContentLayout {
    let mut parts: Vec<(Part, Size)> = Vec::with_capacity(3);
    if let Some(symbol) = content.image_part() {
        parts.push((
            Part::Icon(symbol.clone()),
            Size::new(metrics.icon_size, metrics.icon_size),
        ));
    }
    if let Some(text) = content.text_part() {
        parts.push((
            Part::Label(text.to_string()),
            measure_text(text, metrics.font_size),
        ));
    }
    if let Some(value) = content.progress_part() {
        parts.push((Part::Progress(value), metrics.progress_size));
    }

    let gaps = metrics.spacing * parts.len().saturating_sub(1) as f32;
    let widths = parts.iter().map(|(_, s)| s.width);
    let heights = parts.iter().map(|(_, s)| s.height);
    let inner = match metrics.axis {
        Axis::Vertical => Size::new(widths.fold(0.0, f32::max), heights.sum::<f32>() + gaps),
        Axis::Horizontal => Size::new(widths.sum::<f32>() + gaps, heights.fold(0.0, f32::max)),
    };
    let outer = inner.inflate(metrics.padding);
    let size = Size::new(
        outer.width.max(metrics.min_size.width),
        outer.height.max(metrics.min_size.height),
    );

    let mut cursor = match metrics.axis {
        Axis::Vertical => (size.height - inner.height) / 2.0,
        Axis::Horizontal => (size.width - inner.width) / 2.0,
    };
    let mut elements = Vec::with_capacity(parts.len());
    for (part, part_size) in parts {
        let frame = match metrics.axis {
            Axis::Vertical => Rect::new(
                (size.width - part_size.width) / 2.0,
                cursor,
                part_size.width,
                part_size.height,
            ),
            Axis::Horizontal => Rect::new(
                cursor,
                (size.height - part_size.height) / 2.0,
                part_size.width,
                part_size.height,
            ),
        };
        cursor += match metrics.axis {
            Axis::Vertical => part_size.height,
            Axis::Horizontal => part_size.width,
        } + metrics.spacing;

        elements.push(match part {
            Part::Icon(symbol) => LayoutElement::Icon { symbol, frame },
            Part::Label(text) => LayoutElement::Label {
                text,
                frame,
                font_size: metrics.font_size,
            },
            Part::Progress(value) => LayoutElement::ProgressBar { frame, value },
        });
    }

    ContentLayout {
        size,
        elements,
        foreground: metrics.foreground,
        background: metrics.background,
    }
}
