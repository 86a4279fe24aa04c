//! Screen geometry
//!
//! Plain value types for positions and sizes plus the query that turns a
//! style's placement and the rendered content size into a window frame.
//! Coordinates are logical pixels with a top-left origin.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Grow by `amount` on every side
    pub fn inflate(self, amount: f32) -> Self {
        Self::new(self.width + amount * 2.0, self.height + amount * 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Whether `other` lies fully inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Same center, size multiplied by `factor`
    pub fn scaled_about_center(&self, factor: f32) -> Rect {
        let center = self.center();
        let width = self.size.width * factor;
        let height = self.size.height * factor;
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }
}

/// Vertical anchor of an alert on its screen; alerts are always horizontally centered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    #[default]
    Center,
    Top,
    Bottom,
}

/// Where a style wants its window placed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub anchor: Anchor,
    /// Distance from the anchored edge, or a downward shift for `Center`
    pub margin: f32,
}

impl Placement {
    pub const fn new(anchor: Anchor, margin: f32) -> Self {
        Self { anchor, margin }
    }
}

/// The display an alert is shown on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenInfo {
    /// Whole display
    pub frame: Rect,
    /// Display minus menu bars, docks and taskbars
    pub visible_frame: Rect,
    /// A full-screen application currently owns this display
    pub is_full_screen: bool,
}

impl ScreenInfo {
    /// A screen whose visible area equals its frame
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            visible_frame: frame,
            is_full_screen: false,
        }
    }

    /// Area alerts may occupy. In full-screen mode there is no menu bar or
    /// dock to avoid, so the whole frame is available.
    pub fn safe_rect(&self) -> Rect {
        if self.is_full_screen {
            self.frame
        } else {
            self.visible_frame
        }
    }
}

/// Compute the window frame for content of `size` placed inside `safe_rect`
pub fn frame_for(placement: Placement, size: Size, safe_rect: Rect) -> Rect {
    let x = safe_rect.origin.x + (safe_rect.size.width - size.width) / 2.0;
    let y = match placement.anchor {
        Anchor::Center => {
            safe_rect.origin.y + (safe_rect.size.height - size.height) / 2.0 + placement.margin
        }
        Anchor::Top => safe_rect.origin.y + placement.margin,
        Anchor::Bottom => safe_rect.max_y() - size.height - placement.margin,
    };

    Rect::new(x.round(), y.round(), size.width, size.height)
}
