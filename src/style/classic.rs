//! Classic HUD: a large blurred square near the bottom of the screen

use super::{AlertStyle, StyleKey, Transition, WindowContext, WindowStyleMask};
use crate::geometry::{Anchor, Placement, Size};
use crate::render::Metrics;
use crate::ui::VisualEffect;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassicStyle {
    pub transition_in: Option<Transition>,
    pub duration: Duration,
    pub transition_out: Option<Transition>,
    /// Distance from the bottom of the safe area
    pub bottom_margin: f32,
    pub corner_radius: f32,
    /// Side of the square
    pub side: f32,
}

impl Default for ClassicStyle {
    fn default() -> Self {
        Self {
            transition_in: Some(Transition::fade(Duration::from_millis(150))),
            duration: Duration::from_millis(1500),
            transition_out: Some(Transition::fade(Duration::from_millis(500))),
            bottom_margin: 140.0,
            corner_radius: 18.0,
            side: 200.0,
        }
    }
}

impl AlertStyle for ClassicStyle {
    fn key(&self) -> StyleKey {
        StyleKey::of::<Self>()
    }

    fn transition_in(&self) -> Option<Transition> {
        self.transition_in
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn transition_out(&self) -> Option<Transition> {
        self.transition_out
    }

    fn window_style_mask(&self) -> WindowStyleMask {
        WindowStyleMask::BORDERLESS
            | WindowStyleMask::NON_ACTIVATING_PANEL
            | WindowStyleMask::HUD_WINDOW
    }

    fn setup_window(&self, context: &mut WindowContext<'_>) {
        context.set_corner_radius(self.corner_radius);
        context.apply_visual_effect(VisualEffect::HudBlur);
    }

    fn update_window(&self, context: &mut WindowContext<'_>) {
        context.set_placement(Placement::new(Anchor::Bottom, self.bottom_margin));
    }

    fn metrics(&self) -> Metrics {
        Metrics {
            min_size: Size::new(self.side, self.side),
            ..Metrics::default()
        }
    }
}
