//! In-memory window backend
//!
//! Windows are plain records. A [`HeadlessProbe`] shares the records so tests
//! (or a host without a display server) can observe what the alerts did.

use super::{OverlayWindow, VisualEffect, WindowBackend, WindowConfig, WindowId};
use crate::error::Result;
use crate::geometry::{Rect, ScreenInfo};
use crate::render::ContentLayout;
use parking_lot::Mutex;
use std::sync::Arc;

/// Default screen: a 1440x900 display with a 25px menu bar
pub const DEFAULT_SCREEN: ScreenInfo = ScreenInfo {
    frame: Rect::new(0.0, 0.0, 1440.0, 900.0),
    visible_frame: Rect::new(0.0, 25.0, 1440.0, 875.0),
    is_full_screen: false,
};

/// Observable state of one headless window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub config: WindowConfig,
    pub frame: Rect,
    pub alpha: f32,
    pub scale: f32,
    pub visible: bool,
    pub corner_radius: f32,
    pub effect: Option<VisualEffect>,
    pub layout: Option<ContentLayout>,
    pub draw_count: usize,
    pub closed: bool,
}

impl WindowRecord {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            frame: Rect::default(),
            alpha: 0.0,
            scale: 1.0,
            visible: false,
            corner_radius: 0.0,
            effect: None,
            layout: None,
            draw_count: 0,
            closed: false,
        }
    }
}

#[derive(Debug)]
struct HeadlessState {
    screen: Option<ScreenInfo>,
    windows: Vec<WindowRecord>,
}

type Shared = Arc<Mutex<HeadlessState>>;

/// Backend whose windows only exist in memory
#[derive(Debug)]
pub struct HeadlessBackend {
    state: Shared,
    windows: Vec<Option<HeadlessWindow>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::with_screen(Some(DEFAULT_SCREEN))
    }

    /// Backend reporting `screen` (or no screen at all)
    pub fn with_screen(screen: Option<ScreenInfo>) -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessState {
                screen,
                windows: Vec::new(),
            })),
            windows: Vec::new(),
        }
    }

    pub fn probe(&self) -> HeadlessProbe {
        HeadlessProbe {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowBackend for HeadlessBackend {
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId> {
        let index = {
            let mut state = self.state.lock();
            state.windows.push(WindowRecord::new(*config));
            state.windows.len() - 1
        };
        self.windows.push(Some(HeadlessWindow {
            index,
            state: Arc::clone(&self.state),
        }));
        Ok(WindowId(index))
    }

    fn close_window(&mut self, id: WindowId) {
        if let Some(slot) = self.windows.get_mut(id.0) {
            if slot.take().is_some() {
                let mut state = self.state.lock();
                let record = &mut state.windows[id.0];
                record.closed = true;
                record.visible = false;
            }
        }
    }

    fn window(&mut self, id: WindowId) -> Option<&mut dyn OverlayWindow> {
        self.windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .map(|window| window as &mut dyn OverlayWindow)
    }

    fn main_screen(&self) -> Option<ScreenInfo> {
        self.state.lock().screen
    }
}

#[derive(Debug)]
struct HeadlessWindow {
    index: usize,
    state: Shared,
}

impl HeadlessWindow {
    fn read<R>(&self, f: impl FnOnce(&WindowRecord) -> R) -> R {
        f(&self.state.lock().windows[self.index])
    }

    fn write(&mut self, f: impl FnOnce(&mut WindowRecord)) {
        f(&mut self.state.lock().windows[self.index])
    }
}

impl OverlayWindow for HeadlessWindow {
    fn frame(&self) -> Rect {
        self.read(|r| r.frame)
    }

    fn set_frame(&mut self, frame: Rect) {
        self.write(|r| r.frame = frame)
    }

    fn alpha(&self) -> f32 {
        self.read(|r| r.alpha)
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.write(|r| r.alpha = alpha.clamp(0.0, 1.0))
    }

    fn set_scale(&mut self, scale: f32) {
        self.write(|r| r.scale = scale)
    }

    fn set_corner_radius(&mut self, radius: f32) {
        self.write(|r| r.corner_radius = radius)
    }

    fn apply_visual_effect(&mut self, effect: VisualEffect) {
        self.write(|r| r.effect = Some(effect))
    }

    fn draw(&mut self, layout: &ContentLayout) {
        self.write(|r| {
            r.layout = Some(layout.clone());
            r.draw_count += 1;
        })
    }

    fn order_front(&mut self) {
        self.write(|r| r.visible = true)
    }

    fn order_out(&mut self) {
        self.write(|r| r.visible = false)
    }

    fn is_visible(&self) -> bool {
        self.read(|r| r.visible)
    }
}

/// Read side of a [`HeadlessBackend`], usable from any thread
#[derive(Debug, Clone)]
pub struct HeadlessProbe {
    state: Shared,
}

impl HeadlessProbe {
    /// Windows ever created, closed ones included
    pub fn window_count(&self) -> usize {
        self.state.lock().windows.len()
    }

    pub fn open_window_count(&self) -> usize {
        self.state.lock().windows.iter().filter(|w| !w.closed).count()
    }

    pub fn visible_window_count(&self) -> usize {
        self.state.lock().windows.iter().filter(|w| w.visible).count()
    }

    pub fn window(&self, id: WindowId) -> Option<WindowRecord> {
        self.state.lock().windows.get(id.0).cloned()
    }

    /// Swap the reported screen, e.g. to unplug the display or enter full-screen
    pub fn set_screen(&self, screen: Option<ScreenInfo>) {
        self.state.lock().screen = screen;
    }
}
