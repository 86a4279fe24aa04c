//! Alert content
//!
//! What an alert says: some combination of a line of text, a symbol image and
//! a progress bar. Content is plain data and is consumed by one show call.

use std::fmt;

/// A named image, resolved by the renderer (e.g. `"speaker.wave.2"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content displayed by one alert
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Image(Symbol),
    TextAndImage { text: String, image: Symbol },
    TextAndProgress { text: String, progress: f32 },
    ImageAndProgress { image: Symbol, progress: f32 },
    Progress(f32),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn image(image: impl Into<Symbol>) -> Self {
        Content::Image(image.into())
    }

    pub fn text_and_image(text: impl Into<String>, image: impl Into<Symbol>) -> Self {
        Content::TextAndImage {
            text: text.into(),
            image: image.into(),
        }
    }

    /// Progress is clamped to `0.0..=1.0`
    pub fn text_and_progress(text: impl Into<String>, progress: f32) -> Self {
        Content::TextAndProgress {
            text: text.into(),
            progress: clamp_progress(progress),
        }
    }

    /// Progress is clamped to `0.0..=1.0`
    pub fn image_and_progress(image: impl Into<Symbol>, progress: f32) -> Self {
        Content::ImageAndProgress {
            image: image.into(),
            progress: clamp_progress(progress),
        }
    }

    pub fn progress(progress: f32) -> Self {
        Content::Progress(clamp_progress(progress))
    }

    pub fn text_part(&self) -> Option<&str> {
        match self {
            Content::Text(text)
            | Content::TextAndImage { text, .. }
            | Content::TextAndProgress { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn image_part(&self) -> Option<&Symbol> {
        match self {
            Content::Image(image)
            | Content::TextAndImage { image, .. }
            | Content::ImageAndProgress { image, .. } => Some(image),
            _ => None,
        }
    }

    pub fn progress_part(&self) -> Option<f32> {
        match self {
            Content::TextAndProgress { progress, .. }
            | Content::ImageAndProgress { progress, .. }
            | Content::Progress(progress) => Some(clamp_progress(*progress)),
            _ => None,
        }
    }
}

// NaN collapses to an empty bar
fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
