//! UI-affine execution domain
//!
//! Every window operation runs on exactly one thread. Slots never touch a
//! window directly: they send a job to the UI domain and block until it
//! replies. Backends implement [`WindowBackend`] and live on that thread, so
//! they do not need to be `Send`.
//!
//! Two dispatchers exist:
//! - [`UiThread`] - a dedicated thread that owns its backend (tests, headless hosts)
//! - [`crate::overlay::DesktopUi`] - the `winit` event loop on the main thread

pub mod headless;

use crate::error::{AlertError, Result};
use crate::geometry::{Rect, ScreenInfo};
use crate::render::{Color, ContentLayout};
use crate::style::WindowStyleMask;
use crossbeam::channel::{bounded, unbounded, Sender};
use std::fmt;
use std::sync::Arc;
use std::thread;
use tracing::{debug, error};

/// Index of a window inside its backend's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub usize);

/// Stacking level of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowLevel {
    Normal,
    /// Above regular and floating windows, the level used by system HUDs
    #[default]
    Overlay,
}

/// Persistent visual treatment applied once at window setup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualEffect {
    /// Dark translucent HUD material
    HudBlur,
    /// Solid tinted background
    Tinted(Color),
}

/// Properties every alert window is created with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    pub style_mask: WindowStyleMask,
    pub level: WindowLevel,
    /// Clicks pass through to whatever is underneath
    pub ignores_mouse_events: bool,
    /// Hidden from alt-tab, taskbars and window overviews
    pub excluded_from_window_switcher: bool,
    /// Never steals keyboard focus or becomes the main window
    pub can_become_key: bool,
}

impl WindowConfig {
    /// The borderless, click-through, non-activating configuration alerts use
    pub fn overlay(style_mask: WindowStyleMask) -> Self {
        Self {
            style_mask,
            level: WindowLevel::Overlay,
            ignores_mouse_events: true,
            excluded_from_window_switcher: true,
            can_become_key: false,
        }
    }
}

/// One on-screen surface owned by a backend
pub trait OverlayWindow {
    fn frame(&self) -> Rect;
    fn set_frame(&mut self, frame: Rect);
    fn alpha(&self) -> f32;
    fn set_alpha(&mut self, alpha: f32);
    /// Transient content scale used by scale transitions, 1.0 is identity
    fn set_scale(&mut self, scale: f32);
    fn set_corner_radius(&mut self, radius: f32);
    fn apply_visual_effect(&mut self, effect: VisualEffect);
    /// Replace the drawn content
    fn draw(&mut self, layout: &ContentLayout);
    /// Show without activating
    fn order_front(&mut self);
    fn order_out(&mut self);
    fn is_visible(&self) -> bool;
}

/// Platform window factory and screen query, used only on the UI thread
pub trait WindowBackend {
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId>;
    fn close_window(&mut self, id: WindowId);
    fn window(&mut self, id: WindowId) -> Option<&mut dyn OverlayWindow>;
    /// Display alerts target, `None` if no display is attached
    fn main_screen(&self) -> Option<ScreenInfo>;
}

/// Work executed on the UI thread
pub type UiJob = Box<dyn FnOnce(&mut dyn WindowBackend) + Send>;

/// Something that can run jobs on the UI thread
pub trait UiDispatch: Send + Sync {
    fn dispatch(&self, job: UiJob) -> Result<()>;
}

/// Cloneable entry point into the UI domain
#[derive(Clone)]
pub struct UiHandle {
    dispatch: Arc<dyn UiDispatch>,
}

impl fmt::Debug for UiHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiHandle").finish_non_exhaustive()
    }
}

impl UiHandle {
    pub fn new(dispatch: Arc<dyn UiDispatch>) -> Self {
        Self { dispatch }
    }

    /// Run `f` on the UI thread and block until it returns.
    ///
    /// Must not be called from the UI thread itself.
    pub fn call<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut dyn WindowBackend) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply_tx, reply_rx) = bounded(1);
        self.dispatch
            .dispatch(Box::new(move |backend: &mut dyn WindowBackend| {
                let _ = reply_tx.send(f(backend));
            }))?;

        reply_rx
            .recv()
            .map_err(|_| AlertError::internal("UI domain dropped a request"))
    }

    /// Run `f` against one window on the UI thread
    pub fn with_window<R, F>(&self, id: WindowId, f: F) -> Result<R>
    where
        F: FnOnce(&mut dyn OverlayWindow) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.call(move |backend: &mut dyn WindowBackend| backend.window(id).map(f))?
            .ok_or_else(|| AlertError::internal(format!("alert window {} is missing", id.0)))
    }
}

/// A dedicated UI thread owning its backend
pub struct UiThread {
    tx: Sender<UiJob>,
}

impl UiThread {
    /// Spawn the thread; `factory` builds the backend on it
    pub fn spawn<B, F>(factory: F) -> Result<Self>
    where
        B: WindowBackend + 'static,
        F: FnOnce() -> B + Send + 'static,
    {
        let (tx, rx) = unbounded::<UiJob>();

        thread::Builder::new()
            .name("hud-ui".to_string())
            .spawn(move || {
                let mut backend = factory();
                debug!("UI thread started");
                for job in rx {
                    job(&mut backend);
                }
                debug!("UI thread finished");
            })
            .map_err(|e| {
                error!("Failed to spawn UI thread: {}", e);
                AlertError::internal(format!("failed to spawn UI thread: {e}"))
            })?;

        Ok(Self { tx })
    }

    /// Convert into a handle; the thread exits once every handle is dropped
    pub fn into_handle(self) -> UiHandle {
        UiHandle::new(Arc::new(self))
    }
}

impl UiDispatch for UiThread {
    fn dispatch(&self, job: UiJob) -> Result<()> {
        self.tx
            .send(job)
            .map_err(|_| AlertError::internal("UI thread has stopped"))
    }
}

#[cfg(test)]
mod tests {
    use super::headless::HeadlessBackend;
    use super::*;

    #[test]
    fn test_call_runs_on_ui_thread() {
        let ui = UiThread::spawn(HeadlessBackend::new).unwrap().into_handle();

        let name = ui
            .call(|_backend: &mut dyn WindowBackend| {
                thread::current().name().map(str::to_string)
            })
            .unwrap();
        assert_eq!(name.as_deref(), Some("hud-ui"));
    }

    #[test]
    fn test_with_window_reports_missing_window() {
        let ui = UiThread::spawn(HeadlessBackend::new).unwrap().into_handle();

        let err = ui.with_window(WindowId(7), |w| w.alpha()).unwrap_err();
        assert!(matches!(err, AlertError::InternalInconsistency(_)));
    }

    #[test]
    fn test_overlay_config_is_click_through() {
        let config = WindowConfig::overlay(WindowStyleMask::BORDERLESS);
        assert_eq!(config.level, WindowLevel::Overlay);
        assert!(config.ignores_mouse_events);
        assert!(config.excluded_from_window_switcher);
        assert!(!config.can_become_key);
    }
}
