//! Alert styles
//!
//! A style is the capability the core consumes to configure alert windows:
//! timing (transition in, on-screen duration, transition out), a one-time
//! window setup and a per-show window update. Pools are keyed by the style's
//! concrete type, since a window set up for one style is not interchangeable
//! with another.
//!
//! Stock styles:
//! - [`ClassicStyle`] - large rounded square near the bottom of the screen
//! - [`BannerStyle`] - pill at the top of the screen, scales in and out
//! - [`MinimalStyle`] - compact bar at the bottom, appears instantly

mod banner;
mod classic;
mod minimal;

pub use banner::BannerStyle;
pub use classic::ClassicStyle;
pub use minimal::MinimalStyle;

use crate::geometry::{Placement, Rect, ScreenInfo};
use crate::render::Metrics;
use crate::ui::{OverlayWindow, VisualEffect};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

bitflags! {
    /// Window chrome requested by a style at creation time
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyleMask: u32 {
        const BORDERLESS = 1;
        const NON_ACTIVATING_PANEL = 1 << 1;
        const FULL_SIZE_CONTENT_VIEW = 1 << 2;
        const HUD_WINDOW = 1 << 3;
    }
}

/// Identity of a concrete style type, used to key slot pools
#[derive(Clone, Copy)]
pub struct StyleKey {
    id: TypeId,
    name: &'static str,
}

impl StyleKey {
    pub fn of<S: 'static>() -> Self {
        Self {
            id: TypeId::of::<S>(),
            name: type_name::<S>(),
        }
    }

    /// Type name without the module path
    pub fn name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for StyleKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StyleKey {}

impl Hash for StyleKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionKind {
    Fade,
    /// Fade combined with a scale from/to `scale`
    ScaleFade { scale: f32 },
}

/// Animated effect played when an alert appears or disappears
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub duration: Duration,
}

impl Transition {
    pub fn fade(duration: Duration) -> Self {
        Self {
            kind: TransitionKind::Fade,
            duration,
        }
    }

    pub fn scale_fade(duration: Duration, scale: f32) -> Self {
        Self {
            kind: TransitionKind::ScaleFade { scale },
            duration,
        }
    }

    /// Scale at the hidden end of the transition
    pub fn hidden_scale(&self) -> f32 {
        match self.kind {
            TransitionKind::Fade => 1.0,
            TransitionKind::ScaleFade { scale } => scale,
        }
    }
}

/// What a style callback gets to work with: the window, its target screen and
/// a few presentation helpers.
pub struct WindowContext<'a> {
    window: &'a mut dyn OverlayWindow,
    screen: ScreenInfo,
    placement: Placement,
}

impl<'a> WindowContext<'a> {
    pub fn new(window: &'a mut dyn OverlayWindow, screen: ScreenInfo) -> Self {
        Self {
            window,
            screen,
            placement: Placement::default(),
        }
    }

    pub fn window(&mut self) -> &mut (dyn OverlayWindow + 'a) {
        &mut *self.window
    }

    pub fn screen(&self) -> &ScreenInfo {
        &self.screen
    }

    /// Area the alert may occupy on its screen
    pub fn safe_rect(&self) -> Rect {
        self.screen.safe_rect()
    }

    pub fn is_full_screen(&self) -> bool {
        self.screen.is_full_screen
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.window.set_corner_radius(radius);
    }

    pub fn apply_visual_effect(&mut self, effect: VisualEffect) {
        self.window.apply_visual_effect(effect);
    }

    /// Position the window once its content has been sized
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }
}

/// The style capability consumed by alert slots
pub trait AlertStyle: fmt::Debug + Send + Sync + 'static {
    /// Pool key; implementations return `StyleKey::of::<Self>()`
    fn key(&self) -> StyleKey;

    fn transition_in(&self) -> Option<Transition>;

    /// Time fully on screen before the alert dismisses itself
    fn duration(&self) -> Duration;

    fn transition_out(&self) -> Option<Transition>;

    /// Chrome for new windows; read once per window
    fn window_style_mask(&self) -> WindowStyleMask {
        WindowStyleMask::BORDERLESS | WindowStyleMask::NON_ACTIVATING_PANEL
    }

    /// Style-invariant setup, run once right after the window is created
    fn setup_window(&self, _context: &mut WindowContext<'_>) {}

    /// Run on every show before the content is rendered
    fn update_window(&self, context: &mut WindowContext<'_>);

    /// Layout parameters for the content renderer
    fn metrics(&self) -> Metrics {
        Metrics::default()
    }
}

/// Stock style selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleChoice {
    #[default]
    Classic,
    Banner,
    Minimal,
}

impl StyleChoice {
    pub fn style(self) -> Arc<dyn AlertStyle> {
        match self {
            StyleChoice::Classic => Arc::new(ClassicStyle::default()),
            StyleChoice::Banner => Arc::new(BannerStyle::default()),
            StyleChoice::Minimal => Arc::new(MinimalStyle::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::headless::HeadlessBackend;
    use crate::ui::{WindowBackend, WindowConfig};

    #[test]
    fn test_style_keys_distinguish_types() {
        assert_eq!(StyleKey::of::<ClassicStyle>(), ClassicStyle::default().key());
        assert_ne!(StyleKey::of::<ClassicStyle>(), StyleKey::of::<BannerStyle>());
        assert_eq!(StyleKey::of::<BannerStyle>().name(), "BannerStyle");
    }

    #[test]
    fn test_style_choice_keys() {
        assert_eq!(StyleChoice::Classic.style().key(), StyleKey::of::<ClassicStyle>());
        assert_eq!(StyleChoice::Banner.style().key(), StyleKey::of::<BannerStyle>());
        assert_eq!(StyleChoice::Minimal.style().key(), StyleKey::of::<MinimalStyle>());
    }

    #[test]
    fn test_style_choice_serde() {
        let json = serde_json::to_string(&StyleChoice::Banner).unwrap();
        assert_eq!(json, "\"banner\"");
        let parsed: StyleChoice = serde_json::from_str("\"minimal\"").unwrap();
        assert_eq!(parsed, StyleChoice::Minimal);
    }

    #[test]
    fn test_context_helpers_reach_window() {
        let mut backend = HeadlessBackend::new();
        let probe = backend.probe();
        let screen = backend.main_screen().unwrap();
        let id = backend
            .create_window(&WindowConfig::overlay(WindowStyleMask::BORDERLESS))
            .unwrap();

        let mut context = WindowContext::new(backend.window(id).unwrap(), screen);
        context.set_corner_radius(12.0);
        context.apply_visual_effect(VisualEffect::HudBlur);
        assert_eq!(context.safe_rect(), screen.visible_frame);

        let record = probe.window(id).unwrap();
        assert_eq!(record.corner_radius, 12.0);
        assert_eq!(record.effect, Some(VisualEffect::HudBlur));
    }
}
