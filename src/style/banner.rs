//! Banner: a tinted pill at the top of the screen that scales in and out

use super::{AlertStyle, StyleKey, Transition, WindowContext};
use crate::geometry::{Anchor, Placement, Size};
use crate::render::{Axis, Color, Metrics};
use crate::ui::VisualEffect;
use std::time::Duration;

const HEIGHT: f32 = 52.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BannerStyle {
    pub transition_in: Option<Transition>,
    pub duration: Duration,
    pub transition_out: Option<Transition>,
    pub top_margin: f32,
    pub tint: Color,
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            transition_in: Some(Transition::scale_fade(Duration::from_millis(250), 0.85)),
            duration: Duration::from_secs(2),
            transition_out: Some(Transition::scale_fade(Duration::from_millis(300), 0.9)),
            top_margin: 12.0,
            tint: Color::HUD_LIGHT,
        }
    }
}

impl AlertStyle for BannerStyle {
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

    fn setup_window(&self, context: &mut WindowContext<'_>) {
        context.set_corner_radius(HEIGHT / 2.0);
        context.apply_visual_effect(VisualEffect::Tinted(self.tint));
    }

    fn update_window(&self, context: &mut WindowContext<'_>) {
        context.set_placement(Placement::new(Anchor::Top, self.top_margin));
    }

    fn metrics(&self) -> Metrics {
        Metrics {
            axis: Axis::Horizontal,
            padding: 14.0,
            spacing: 10.0,
            icon_size: 24.0,
            font_size: 15.0,
            progress_size: Size::new(120.0, 6.0),
            min_size: Size::new(220.0, HEIGHT),
            foreground: Color::rgba(0.1, 0.1, 0.1, 1.0),
            background: self.tint,
        }
    }
}
