//! Minimal: a compact bar at the bottom that appears without a transition

use super::{AlertStyle, StyleKey, Transition, WindowContext};
use crate::geometry::{Anchor, Placement, Size};
use crate::render::{Axis, Color, Metrics};
use crate::ui::VisualEffect;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct MinimalStyle {
    pub duration: Duration,
    pub transition_out: Option<Transition>,
    pub bottom_margin: f32,
}

impl Default for MinimalStyle {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            transition_out: Some(Transition::fade(Duration::from_millis(250))),
            bottom_margin: 60.0,
        }
    }
}

impl AlertStyle for MinimalStyle {
    fn key(&self) -> StyleKey {
        StyleKey::of::<Self>()
    }

    fn transition_in(&self) -> Option<Transition> {
        None
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn transition_out(&self) -> Option<Transition> {
        self.transition_out
    }

    fn setup_window(&self, context: &mut WindowContext<'_>) {
        context.set_corner_radius(8.0);
        context.apply_visual_effect(VisualEffect::Tinted(Color::HUD_DARK));
    }

    fn update_window(&self, context: &mut WindowContext<'_>) {
        // No menu bar or dock to clear in full-screen mode
        let margin = if context.is_full_screen() {
            self.bottom_margin / 2.0
        } else {
            self.bottom_margin
        };
        context.set_placement(Placement::new(Anchor::Bottom, margin));
    }

    fn metrics(&self) -> Metrics {
        Metrics {
            axis: Axis::Horizontal,
            padding: 10.0,
            spacing: 8.0,
            icon_size: 20.0,
            font_size: 14.0,
            progress_size: Size::new(100.0, 4.0),
            min_size: Size::new(160.0, 40.0),
            ..Metrics::default()
        }
    }
}
