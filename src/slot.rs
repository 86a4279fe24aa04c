//! Alert slots
//!
//! A slot is one reusable presentation unit: a lazily created window plus the
//! phase of whatever it is currently showing. Phases only move through
//! [`AlertSlot::show`] and [`AlertSlot::dismiss`]:
//!
//! ```text
//! Inactive -> PreparingWindow -> TransitioningIn -> StaticallyDisplayed
//!     ^                                                   |
//!     +------------------ TransitioningOut <--------------+ (dismiss timer)
//! ```
//!
//! Show and dismiss are single-writer per slot (`writer` lock). A show that
//! arrives while an entry animation is playing blocks until the slot is
//! statically displayed, then updates it in place. Each show bumps the slot's
//! generation; the dismiss timer it schedules only acts if the generation is
//! still the same, so a stale timer can never hide newer content.

use crate::animation::{self, Animation};
use crate::content::Content;
use crate::error::{AlertError, Result};
use crate::geometry;
use crate::render::ContentRenderer;
use crate::style::{AlertStyle, StyleKey, Transition, WindowContext};
use crate::ui::{UiHandle, WindowBackend, WindowConfig, WindowId};
use crossbeam::channel::{bounded, Sender};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, trace, warn};

/// Lifecycle state of a slot's current presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertPhase {
    Inactive,
    PreparingWindow,
    TransitioningIn,
    StaticallyDisplayed,
    TransitioningOut,
}

impl AlertPhase {
    /// Entry work is in progress and the window must not be torn
    pub fn is_entering(self) -> bool {
        matches!(self, AlertPhase::PreparingWindow | AlertPhase::TransitioningIn)
    }
}

/// Collaborators shared by every slot of a manager
#[derive(Clone)]
pub struct SlotEnvironment {
    pub ui: UiHandle,
    pub renderer: Arc<dyn ContentRenderer>,
    pub frame_interval: Duration,
}

impl fmt::Debug for SlotEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotEnvironment")
            .field("frame_interval", &self.frame_interval)
            .finish_non_exhaustive()
    }
}

/// Pending auto-dismiss. Dropping it cancels the timer thread.
struct DismissTimer {
    _cancel: Sender<()>,
}

impl DismissTimer {
    fn schedule(slot: Arc<AlertSlot>, generation: u64, delay: Duration) -> Result<Self> {
        let (cancel_tx, cancel_rx) = bounded::<()>(0);

        thread::Builder::new()
            .name("hud-dismiss-timer".to_string())
            .spawn(move || {
                crossbeam::select! {
                    recv(cancel_rx) -> _ => trace!(slot = %slot, generation, "dismiss timer cancelled"),
                    default(delay) => slot.dismiss_scheduled(generation),
                }
            })
            .map_err(|e| AlertError::internal(format!("failed to start dismiss timer: {e}")))?;

        Ok(Self { _cancel: cancel_tx })
    }
}

struct SlotState {
    phase: AlertPhase,
    in_use: bool,
    window: Option<WindowId>,
    style: Option<Arc<dyn AlertStyle>>,
    content: Option<Content>,
    /// Bumped by every show, reservation and explicit dismiss
    generation: u64,
    /// Number of times the slot returned to `Inactive` after a dismiss
    dismissals: u64,
    timer: Option<DismissTimer>,
}

impl SlotState {
    fn cancel_timer(&mut self) {
        if self.timer.take().is_some() {
            trace!("cancelled pending dismiss");
        }
        self.generation += 1;
    }
}

/// One reusable alert window and its presentation state
pub struct AlertSlot {
    key: StyleKey,
    index: usize,
    env: SlotEnvironment,
    writer: Mutex<()>,
    state: Mutex<SlotState>,
    phase_changed: Condvar,
}

impl fmt::Display for AlertSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.key, self.index)
    }
}

impl fmt::Debug for AlertSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertSlot")
            .field("key", &self.key)
            .field("index", &self.index)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl AlertSlot {
    pub fn new(key: StyleKey, index: usize, env: SlotEnvironment) -> Self {
        Self {
            key,
            index,
            env,
            writer: Mutex::new(()),
            state: Mutex::new(SlotState {
                phase: AlertPhase::Inactive,
                in_use: false,
                window: None,
                style: None,
                content: None,
                generation: 0,
                dismissals: 0,
                timer: None,
            }),
            phase_changed: Condvar::new(),
        }
    }

    pub fn key(&self) -> StyleKey {
        self.key
    }

    pub fn phase(&self) -> AlertPhase {
        self.state.lock().phase
    }

    pub fn is_in_use(&self) -> bool {
        self.state.lock().in_use
    }

    pub fn window_id(&self) -> Option<WindowId> {
        self.state.lock().window
    }

    /// Content of the most recent show
    pub fn content(&self) -> Option<Content> {
        self.state.lock().content.clone()
    }

    pub fn dismissal_count(&self) -> u64 {
        self.state.lock().dismissals
    }

    /// Whether the slot can take new content: anything but an exit animation.
    ///
    /// A window that is transitioning out has animation-driven frame and alpha
    /// until the animation completes, so it cannot be repurposed.
    pub fn is_reusable(&self) -> bool {
        self.state.lock().phase != AlertPhase::TransitioningOut
    }

    /// Claim the slot for new content.
    ///
    /// Same answer as [`is_reusable`](Self::is_reusable); on success the pending
    /// dismiss timer is cancelled so it cannot fire after the slot has been
    /// reassigned.
    pub fn reserve(&self) -> bool {
        let mut state = self.state.lock();
        if state.phase == AlertPhase::TransitioningOut {
            return false;
        }
        state.cancel_timer();
        state.in_use = true;
        true
    }

    fn set_phase(&self, state: &mut MutexGuard<'_, SlotState>, phase: AlertPhase) {
        trace!(slot = %self, from = ?state.phase, to = ?phase, "phase change");
        state.phase = phase;
        self.phase_changed.notify_all();
    }

    // Blocking-wait policy: never tear a window mid entry animation
    fn wait_while_entering(&self, state: &mut MutexGuard<'_, SlotState>) {
        while state.phase.is_entering() {
            self.phase_changed.wait(state);
        }
    }

    /// Create the window and run the style's one-time setup, if not done yet
    pub fn prepare_window(&self, style: &Arc<dyn AlertStyle>) -> Result<WindowId> {
        let _writer = self.writer.lock();
        self.ensure_window(style)
    }

    fn ensure_window(&self, style: &Arc<dyn AlertStyle>) -> Result<WindowId> {
        if let Some(id) = self.state.lock().window {
            return Ok(id);
        }

        let style = Arc::clone(style);
        let id = self
            .env
            .ui
            .call(move |backend: &mut dyn WindowBackend| -> Result<WindowId> {
                let screen = backend
                    .main_screen()
                    .ok_or_else(|| AlertError::internal("no screen to place alert window on"))?;
                let id = backend.create_window(&WindowConfig::overlay(style.window_style_mask()))?;
                let window = backend
                    .window(id)
                    .ok_or_else(|| AlertError::internal("alert window vanished after creation"))?;

                let mut context = WindowContext::new(window, screen);
                style.setup_window(&mut context);
                Ok(id)
            })??;

        debug!(slot = %self, window = id.0, "created alert window");
        self.state.lock().window = Some(id);
        Ok(id)
    }

    /// Display `content` with `style`.
    ///
    /// Returns once the entry transition has finished and the auto-dismiss is
    /// scheduled. On failure the slot is reset to `Inactive` and stays usable.
    pub fn show(self: &Arc<Self>, content: Content, style: Arc<dyn AlertStyle>) -> Result<()> {
        let writer = self.writer.lock();

        let (generation, was_visible) = {
            let mut state = self.state.lock();
            self.wait_while_entering(&mut state);

            if state.phase == AlertPhase::TransitioningOut {
                // Callers check is_reusable first; landing here means the
                // request lost a race with the exit animation.
                warn!(slot = %self, "show requested while transitioning out, dropping it");
                return Err(AlertError::internal(
                    "show requested while the alert is transitioning out",
                ));
            }

            state.cancel_timer();
            state.in_use = true;
            state.style = Some(Arc::clone(&style));
            state.content = Some(content.clone());
            let was_visible = state.phase == AlertPhase::StaticallyDisplayed;
            self.set_phase(&mut state, AlertPhase::PreparingWindow);
            (state.generation, was_visible)
        };

        let result = self.present(writer, generation, was_visible, content, style);
        if let Err(err) = &result {
            error!(slot = %self, %err, "failed to show alert");
            self.reset_after_failure(generation);
        }
        result
    }

    fn present(
        self: &Arc<Self>,
        writer: MutexGuard<'_, ()>,
        generation: u64,
        was_visible: bool,
        content: Content,
        style: Arc<dyn AlertStyle>,
    ) -> Result<()> {
        let window = self.ensure_window(&style)?;
        self.update_window(window, content, Arc::clone(&style), was_visible)?;

        {
            let mut state = self.state.lock();
            self.set_phase(&mut state, AlertPhase::TransitioningIn);
        }
        // Later shows may queue up now; they wait for StaticallyDisplayed
        drop(writer);

        match style.transition_in() {
            Some(transition) => {
                let start_alpha = if was_visible { 1.0 } else { 0.0 };
                animation::run(
                    &self.env.ui,
                    window,
                    &Animation::entering(&transition, start_alpha),
                    self.env.frame_interval,
                )?;
            }
            None => {
                self.env.ui.with_window(window, |w| {
                    w.set_alpha(1.0);
                    w.set_scale(1.0);
                })?;
            }
        }

        let mut state = self.state.lock();
        self.set_phase(&mut state, AlertPhase::StaticallyDisplayed);
        if state.generation == generation {
            let timer = DismissTimer::schedule(Arc::clone(self), generation, style.duration())?;
            state.timer = Some(timer);
            trace!(slot = %self, generation, delay = ?style.duration(), "scheduled dismiss");
        } else {
            // A newer show or a dismiss owns the slot now
            trace!(slot = %self, generation, "superseded before display, not scheduling dismiss");
        }
        Ok(())
    }

    fn update_window(
        &self,
        window: WindowId,
        content: Content,
        style: Arc<dyn AlertStyle>,
        was_visible: bool,
    ) -> Result<()> {
        let renderer = Arc::clone(&self.env.renderer);

        self.env
            .ui
            .call(move |backend: &mut dyn WindowBackend| -> Result<()> {
                let screen = backend
                    .main_screen()
                    .ok_or_else(|| AlertError::internal("no screen to show alert on"))?;
                let window = backend
                    .window(window)
                    .ok_or_else(|| AlertError::internal("alert window is missing"))?;

                let mut context = WindowContext::new(window, screen);
                style.update_window(&mut context);
                let placement = context.placement();

                let window = context.window();
                let size = renderer.render(&content, style.as_ref(), &mut *window)?;
                window.set_frame(geometry::frame_for(placement, size, screen.safe_rect()));
                if !was_visible {
                    let hidden_scale = style.transition_in().map_or(1.0, |t| t.hidden_scale());
                    window.set_alpha(0.0);
                    window.set_scale(hidden_scale);
                }
                window.order_front();
                Ok(())
            })?
    }

    // The failed show still owns the phase here: later writers wait while it
    // is entering, so hide first and only then release the slot.
    fn reset_after_failure(&self, generation: u64) {
        if let Some(window) = self.window_id() {
            let hidden = self.env.ui.with_window(window, |w| {
                w.order_out();
                w.set_alpha(0.0);
                w.set_scale(1.0);
            });
            if let Err(err) = hidden {
                warn!(slot = %self, %err, "could not hide window after failed show");
            }
        }

        let mut state = self.state.lock();
        if state.generation == generation {
            state.cancel_timer();
            state.in_use = false;
        } else {
            trace!(slot = %self, generation, "slot reserved again, keeping claim");
        }
        self.set_phase(&mut state, AlertPhase::Inactive);
    }

    // Called on the timer thread
    fn dismiss_scheduled(&self, generation: u64) {
        let (window, transition) = {
            let mut state = self.state.lock();
            if state.generation != generation || state.phase != AlertPhase::StaticallyDisplayed {
                trace!(slot = %self, generation, "stale dismiss timer ignored");
                return;
            }
            let Some(window) = state.window else {
                return;
            };
            state.timer = None;
            self.set_phase(&mut state, AlertPhase::TransitioningOut);
            (window, state.style.as_ref().and_then(|s| s.transition_out()))
        };

        if let Err(err) = self.finish_dismiss(window, transition) {
            error!(slot = %self, %err, "failed to dismiss alert");
        }
    }

    /// Hide the alert, animated if `transition` is given, instantly otherwise.
    ///
    /// A dismiss issued during an entry animation waits for it to finish.
    pub fn dismiss(&self, transition: Option<Transition>) -> Result<()> {
        let _writer = self.writer.lock();

        let window = {
            let mut state = self.state.lock();
            self.wait_while_entering(&mut state);

            match (state.phase, state.window) {
                (AlertPhase::Inactive, _) => {
                    state.cancel_timer();
                    state.in_use = false;
                    return Ok(());
                }
                (AlertPhase::TransitioningOut, _) => return Ok(()),
                (_, None) => {
                    return Err(AlertError::internal("displayed alert has no window"));
                }
                (_, Some(window)) => {
                    state.cancel_timer();
                    // Instant hides still hop to the UI thread; the slot must
                    // not be reserved until the window is gone.
                    self.set_phase(&mut state, AlertPhase::TransitioningOut);
                    window
                }
            }
        };

        self.finish_dismiss(window, transition)
    }

    fn finish_dismiss(&self, window: WindowId, transition: Option<Transition>) -> Result<()> {
        let started = Instant::now();
        let animated = match transition {
            Some(transition) => animation::run(
                &self.env.ui,
                window,
                &Animation::exiting(&transition),
                self.env.frame_interval,
            ),
            None => Ok(()),
        };

        // Order out even if the animation failed part way
        let hidden = self.env.ui.with_window(window, |w| {
            w.order_out();
            w.set_alpha(0.0);
            w.set_scale(1.0);
        });

        {
            let mut state = self.state.lock();
            state.in_use = false;
            state.dismissals += 1;
            self.set_phase(&mut state, AlertPhase::Inactive);
        }
        debug!(slot = %self, elapsed = ?started.elapsed(), "alert dismissed");

        animated.and(hidden)
    }

    /// Block until the slot has been dismissed more than `seen` times
    pub fn wait_for_dismissal(&self, seen: u64, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.dismissals <= seen {
            if self
                .phase_changed
                .wait_until(&mut state, deadline)
                .timed_out()
                && state.dismissals <= seen
            {
                return Err(AlertError::Timeout(timeout));
            }
        }
        Ok(())
    }

    /// Hide and close the window for good
    pub fn dispose(&self) -> Result<()> {
        let _writer = self.writer.lock();

        let window = {
            let mut state = self.state.lock();
            state.cancel_timer();
            state.in_use = false;
            state.style = None;
            state.content = None;
            self.set_phase(&mut state, AlertPhase::Inactive);
            state.window.take()
        };

        if let Some(window) = window {
            self.env.ui.call(move |backend: &mut dyn WindowBackend| {
                if let Some(w) = backend.window(window) {
                    w.order_out();
                    w.set_alpha(0.0);
                }
                backend.close_window(window);
            })?;
            debug!(slot = %self, window = window.0, "closed alert window");
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn force_phase(&self, phase: AlertPhase) {
        let mut state = self.state.lock();
        self.set_phase(&mut state, phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LayoutRenderer;
    use crate::style::ClassicStyle;
    use crate::ui::headless::{HeadlessBackend, HeadlessProbe};
    use crate::ui::UiThread;

    fn slot() -> (Arc<AlertSlot>, HeadlessProbe) {
        let backend = HeadlessBackend::new();
        let probe = backend.probe();
        let ui = UiThread::spawn(move || backend).unwrap().into_handle();
        let env = SlotEnvironment {
            ui,
            renderer: Arc::new(LayoutRenderer),
            frame_interval: Duration::from_millis(2),
        };
        (
            Arc::new(AlertSlot::new(StyleKey::of::<ClassicStyle>(), 0, env)),
            probe,
        )
    }

    fn quick_style() -> Arc<dyn AlertStyle> {
        Arc::new(ClassicStyle {
            transition_in: Some(Transition::fade(Duration::from_millis(20))),
            duration: Duration::from_secs(30),
            transition_out: Some(Transition::fade(Duration::from_millis(20))),
            ..ClassicStyle::default()
        })
    }

    #[test]
    fn test_reusable_in_every_phase_but_exit() {
        let (slot, _) = slot();
        for phase in [
            AlertPhase::Inactive,
            AlertPhase::PreparingWindow,
            AlertPhase::TransitioningIn,
            AlertPhase::StaticallyDisplayed,
        ] {
            slot.force_phase(phase);
            assert!(slot.is_reusable(), "{phase:?} should be reusable");
        }

        slot.force_phase(AlertPhase::TransitioningOut);
        assert!(!slot.is_reusable());
        assert!(!slot.reserve());
        assert!(!slot.is_in_use());
    }

    #[test]
    fn test_reserve_cancels_pending_dismiss() {
        let (slot, _) = slot();
        slot.show(Content::text("Volume"), quick_style()).unwrap();

        let generation = slot.state.lock().generation;
        assert!(slot.state.lock().timer.is_some());

        assert!(slot.reserve());
        let state = slot.state.lock();
        assert!(state.timer.is_none());
        assert!(state.generation > generation);
        assert!(state.in_use);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let (slot, _) = slot();
        slot.show(Content::text("Volume"), quick_style()).unwrap();
        let generation = slot.state.lock().generation;

        slot.reserve();
        slot.dismiss_scheduled(generation);
        assert_eq!(slot.phase(), AlertPhase::StaticallyDisplayed);
        assert_eq!(slot.dismissal_count(), 0);
    }

    #[test]
    fn test_show_creates_window_once() {
        let (slot, probe) = slot();
        slot.show(Content::text("One"), quick_style()).unwrap();
        let window = slot.window_id().unwrap();

        slot.show(Content::text("Two"), quick_style()).unwrap();
        assert_eq!(slot.window_id(), Some(window));
        assert_eq!(probe.window_count(), 1);

        let record = probe.window(window).unwrap();
        assert_eq!(record.draw_count, 2);
        assert_eq!(record.corner_radius, 18.0);
        assert_eq!(slot.content(), Some(Content::text("Two")));
    }

    #[test]
    fn test_instant_dismiss() {
        let (slot, probe) = slot();
        slot.show(Content::text("Volume"), quick_style()).unwrap();
        let window = slot.window_id().unwrap();

        slot.dismiss(None).unwrap();
        assert_eq!(slot.phase(), AlertPhase::Inactive);
        assert!(!slot.is_in_use());
        assert_eq!(slot.dismissal_count(), 1);

        let record = probe.window(window).unwrap();
        assert!(!record.visible);
        assert_eq!(record.alpha, 0.0);
    }

    #[test]
    fn test_missing_screen_resets_slot() {
        let (slot, probe) = slot();
        probe.set_screen(None);

        let err = slot.show(Content::text("Volume"), quick_style()).unwrap_err();
        assert!(matches!(err, AlertError::InternalInconsistency(_)));
        assert_eq!(slot.phase(), AlertPhase::Inactive);
        assert!(!slot.is_in_use());
        assert!(slot.is_reusable());

        probe.set_screen(Some(crate::ui::headless::DEFAULT_SCREEN));
        slot.show(Content::text("Volume"), quick_style()).unwrap();
        assert_eq!(slot.phase(), AlertPhase::StaticallyDisplayed);
    }

    #[test]
    fn test_show_while_transitioning_out_is_dropped() {
        let (slot, _) = slot();
        slot.force_phase(AlertPhase::TransitioningOut);

        assert!(slot.show(Content::text("Late"), quick_style()).is_err());
        // The exit animation keeps the slot
        assert_eq!(slot.phase(), AlertPhase::TransitioningOut);
        assert_eq!(slot.content(), None);
    }

    #[test]
    fn test_dispose_closes_window() {
        let (slot, probe) = slot();
        slot.show(Content::text("Volume"), quick_style()).unwrap();

        slot.dispose().unwrap();
        assert_eq!(slot.window_id(), None);
        assert_eq!(probe.open_window_count(), 0);
        assert!(slot.state.lock().timer.is_none());
    }

    fn timed_style(in_ms: u64, duration_ms: u64, out_ms: u64) -> Arc<dyn AlertStyle> {
        Arc::new(ClassicStyle {
            transition_in: Some(Transition::fade(Duration::from_millis(in_ms))),
            duration: Duration::from_millis(duration_ms),
            transition_out: Some(Transition::fade(Duration::from_millis(out_ms))),
            ..ClassicStyle::default()
        })
    }

    fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out waiting for {what}");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_show_during_entry_waits_for_static_display() {
        let (slot, _) = slot();
        let style = timed_style(200, 400, 10);

        let started = Instant::now();
        let first = {
            let slot = Arc::clone(&slot);
            let style = Arc::clone(&style);
            thread::spawn(move || slot.show(Content::text("First"), style))
        };
        wait_until("entry animation", || slot.phase() == AlertPhase::TransitioningIn);

        slot.show(Content::text("Second"), Arc::clone(&style)).unwrap();
        first.join().unwrap().unwrap();

        assert!(started.elapsed() >= Duration::from_millis(200));
        assert_eq!(slot.phase(), AlertPhase::StaticallyDisplayed);
        assert_eq!(slot.content(), Some(Content::text("Second")));
        assert!(slot.state.lock().timer.is_some());

        // Past the first show's deadline, before the second one's
        let past_first = started + Duration::from_millis(650);
        if let Some(remaining) = past_first.checked_duration_since(Instant::now()) {
            thread::sleep(remaining);
        }
        assert_eq!(slot.phase(), AlertPhase::StaticallyDisplayed);
        assert_eq!(slot.dismissal_count(), 0);

        wait_until("dismissal", || slot.dismissal_count() == 1);
        thread::sleep(Duration::from_millis(300));
        assert_eq!(slot.dismissal_count(), 1);
        assert_eq!(slot.phase(), AlertPhase::Inactive);
    }

    #[test]
    fn test_dismiss_during_entry_waits_for_static_display() {
        let (slot, windows) = slot();
        let style = timed_style(150, 300, 10);

        let started = Instant::now();
        let first = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || slot.show(Content::text("Volume"), style))
        };
        wait_until("entry animation", || slot.phase() == AlertPhase::TransitioningIn);

        slot.dismiss(None).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(150));
        first.join().unwrap().unwrap();

        assert_eq!(slot.phase(), AlertPhase::Inactive);
        assert!(slot.state.lock().timer.is_none());
        assert_eq!(windows.visible_window_count(), 0);

        thread::sleep(Duration::from_millis(400));
        assert_eq!(slot.dismissal_count(), 1);
    }

    #[test]
    fn test_instant_dismiss_blocks_reservation_until_hidden() {
        let (slot, _) = slot();
        slot.show(Content::text("Volume"), quick_style()).unwrap();

        // Keep the UI thread busy so the hide stays queued
        let ui = slot.env.ui.clone();
        let busy = thread::spawn(move || {
            ui.call(|_: &mut dyn WindowBackend| thread::sleep(Duration::from_millis(300)))
        });
        thread::sleep(Duration::from_millis(20));

        let dismisser = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || slot.dismiss(None))
        };
        wait_until("hide pending", || slot.phase() == AlertPhase::TransitioningOut);
        assert!(!slot.is_reusable());
        assert!(!slot.reserve());

        dismisser.join().unwrap().unwrap();
        busy.join().unwrap().unwrap();
        assert_eq!(slot.phase(), AlertPhase::Inactive);
        assert!(!slot.is_in_use());
        assert!(slot.reserve());
    }

    #[test]
    fn test_long_exit_transition_is_clamped() {
        let (slot, windows) = slot();
        slot.show(Content::text("Volume"), quick_style()).unwrap();

        let started = Instant::now();
        slot.dismiss(Some(Transition::fade(Duration::from_secs(10))))
            .unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_secs(5), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(7), "{elapsed:?}");
        assert_eq!(slot.phase(), AlertPhase::Inactive);
        assert_eq!(windows.visible_window_count(), 0);
    }
}
