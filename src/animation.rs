//! Transition animations
//!
//! Animations are driven from the calling thread: each frame is one hop to the
//! UI domain that writes alpha and scale, followed by a sleep of one frame
//! interval. [`run`] returns once the last frame has been applied, which is the
//! completion point the slot waits on.

use crate::error::Result;
use crate::style::Transition;
use crate::ui::{UiHandle, WindowId};
use std::thread;
use std::time::{Duration, Instant};
use tracing::trace;

pub const MIN_DURATION: Duration = Duration::from_millis(10);
pub const MAX_DURATION: Duration = Duration::from_secs(5);

/// Roughly 60 frames per second
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Clamp a transition duration to `[0.01s, 5s]`
pub fn clamp_duration(duration: Duration) -> Duration {
    duration.clamp(MIN_DURATION, MAX_DURATION)
}

/// Window appearance at one point of an animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub alpha: f32,
    pub scale: f32,
}

impl Keyframe {
    pub const VISIBLE: Keyframe = Keyframe {
        alpha: 1.0,
        scale: 1.0,
    };

    fn lerp(self, to: Keyframe, t: f32) -> Keyframe {
        Keyframe {
            alpha: self.alpha + (to.alpha - self.alpha) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOut,
    EaseIn,
}

impl Easing {
    fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseIn => t * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub from: Keyframe,
    pub to: Keyframe,
    pub duration: Duration,
    pub easing: Easing,
}

impl Animation {
    /// Entry animation starting at `start_alpha`.
    ///
    /// For a window that is already visible this plays as a scale pulse.
    pub fn entering(transition: &Transition, start_alpha: f32) -> Self {
        Self {
            from: Keyframe {
                alpha: start_alpha,
                scale: transition.hidden_scale(),
            },
            to: Keyframe::VISIBLE,
            duration: clamp_duration(transition.duration),
            easing: Easing::EaseOut,
        }
    }

    /// Exit animation towards alpha 0 and, for scale transitions, the shrink factor
    pub fn exiting(transition: &Transition) -> Self {
        Self {
            from: Keyframe::VISIBLE,
            to: Keyframe {
                alpha: 0.0,
                scale: transition.hidden_scale(),
            },
            duration: clamp_duration(transition.duration),
            easing: Easing::EaseIn,
        }
    }

    pub fn value_at(&self, elapsed: Duration) -> Keyframe {
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(self.to, self.easing.apply(t))
    }
}

/// Play `animation` on `window`, returning after the final frame
pub fn run(
    ui: &UiHandle,
    window: WindowId,
    animation: &Animation,
    frame_interval: Duration,
) -> Result<()> {
    let started = Instant::now();
    let mut frames = 0u32;

    loop {
        let elapsed = started.elapsed();
        let frame = animation.value_at(elapsed);
        ui.with_window(window, move |w| {
            w.set_alpha(frame.alpha);
            w.set_scale(frame.scale);
        })?;
        frames += 1;

        if elapsed >= animation.duration {
            trace!(frames, ?elapsed, "animation finished");
            return Ok(());
        }
        thread::sleep(frame_interval.min(animation.duration - elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_is_clamped() {
        assert_eq!(clamp_duration(Duration::from_secs_f64(0.0001)), MIN_DURATION);
        assert_eq!(clamp_duration(Duration::from_secs(10)), MAX_DURATION);
        assert_eq!(
            clamp_duration(Duration::from_millis(300)),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_exit_animation_uses_clamped_duration() {
        let fast = Animation::exiting(&Transition::fade(Duration::from_secs_f64(0.0001)));
        assert_eq!(fast.duration, Duration::from_millis(10));

        let slow = Animation::exiting(&Transition::scale_fade(Duration::from_secs(10), 0.8));
        assert_eq!(slow.duration, Duration::from_secs(5));
        assert_eq!(slow.to, Keyframe { alpha: 0.0, scale: 0.8 });
    }

    #[test]
    fn test_value_at_endpoints() {
        let animation = Animation::entering(&Transition::fade(Duration::from_millis(200)), 0.0);
        assert_eq!(animation.value_at(Duration::ZERO).alpha, 0.0);
        assert_eq!(animation.value_at(Duration::from_millis(500)), Keyframe::VISIBLE);

        let midway = animation.value_at(Duration::from_millis(100)).alpha;
        assert!(midway > 0.5 && midway < 1.0, "ease-out is ahead of linear: {midway}");
    }

    #[test]
    fn test_visible_window_pulses_scale_only() {
        let animation =
            Animation::entering(&Transition::scale_fade(Duration::from_millis(100), 0.9), 1.0);
        let frame = animation.value_at(Duration::from_millis(50));
        assert_eq!(frame.alpha, 1.0);
        assert!(frame.scale > 0.9 && frame.scale < 1.0);
    }
}
