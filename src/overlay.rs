//! Desktop overlay backend
//!
//! Alert windows are borderless, transparent, always-on-top `winit` windows
//! painted with `softbuffer`. The `winit` event loop is the UI domain: jobs
//! arrive as user events through [`DesktopUi`] and run against a
//! [`WindowBackend`] view of the loop's windows.
//!
//! ```no_run
//! use hud_alerts::{overlay::DesktopOverlay, AlertManager, UiHandle};
//!
//! let (overlay, ui) = DesktopOverlay::new()?;
//! let manager = AlertManager::new(UiHandle::new(ui.clone()));
//! // hand `manager` to a worker thread, then block the main thread:
//! overlay.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Software surfaces have no per-pixel alpha on every platform, so window
//! alpha is applied as a brightness multiplier over black. Labels are drawn as
//! solid text blocks.

use crate::error::{AlertError, Result};
use crate::geometry::{Point, Rect, ScreenInfo};
use crate::render::{Color, ContentLayout, LayoutElement};
use crate::style::WindowStyleMask;
use crate::ui::{
    OverlayWindow, UiDispatch, UiJob, VisualEffect, WindowBackend, WindowConfig, WindowId,
    WindowLevel,
};
use anyhow::Context as _;
use parking_lot::Mutex;
use std::num::NonZeroU32;
use std::rc::Rc;
use tracing::{debug, info, warn};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder};

/// User events understood by the overlay event loop
pub enum DesktopEvent {
    Job(UiJob),
    Exit,
}

/// Dispatcher into the overlay event loop, shareable across threads
pub struct DesktopUi {
    proxy: Mutex<EventLoopProxy<DesktopEvent>>,
}

impl DesktopUi {
    /// Close every alert window and leave the event loop
    pub fn exit(&self) {
        if self.proxy.lock().send_event(DesktopEvent::Exit).is_err() {
            debug!("Overlay event loop already exited");
        }
    }
}

impl UiDispatch for DesktopUi {
    fn dispatch(&self, job: UiJob) -> Result<()> {
        self.proxy
            .lock()
            .send_event(DesktopEvent::Job(job))
            .map_err(|_| AlertError::internal("overlay event loop has exited"))
    }
}

/// Owns the event loop; must be created and run on the main thread
pub struct DesktopOverlay {
    event_loop: EventLoop<DesktopEvent>,
}

impl DesktopOverlay {
    pub fn new() -> anyhow::Result<(Self, std::sync::Arc<DesktopUi>)> {
        let event_loop = EventLoopBuilder::<DesktopEvent>::with_user_event()
            .build()
            .context("Failed to create event loop")?;
        let ui = std::sync::Arc::new(DesktopUi {
            proxy: Mutex::new(event_loop.create_proxy()),
        });
        Ok((Self { event_loop }, ui))
    }

    /// Run until [`DesktopUi::exit`] is called
    pub fn run(self) -> anyhow::Result<()> {
        let mut windows: Vec<Option<DesktopWindow>> = Vec::new();
        info!("Overlay event loop started");

        self.event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Wait);

                match event {
                    Event::UserEvent(DesktopEvent::Job(job)) => {
                        let mut backend = DesktopBackend {
                            target,
                            windows: &mut windows,
                        };
                        job(&mut backend);
                    }
                    Event::UserEvent(DesktopEvent::Exit) => {
                        windows.clear();
                        target.exit();
                    }
                    Event::WindowEvent {
                        window_id,
                        event: WindowEvent::RedrawRequested,
                    } => {
                        if let Some(window) = windows
                            .iter_mut()
                            .flatten()
                            .find(|w| w.window.id() == window_id)
                        {
                            if let Err(e) = window.paint() {
                                warn!("Failed to paint alert window: {}", e);
                            }
                        }
                    }
                    _ => {}
                }
            })
            .context("Overlay event loop failed")?;

        info!("Overlay event loop finished");
        Ok(())
    }
}

/// [`WindowBackend`] view over the event loop for the duration of one job
/// Builder settings derived from a [`WindowConfig`].
///
/// `FULL_SIZE_CONTENT_VIEW` and `HUD_WINDOW` have no `winit` equivalent: the
/// surface always covers the whole window and the HUD look is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NativeOptions {
    decorations: bool,
    active: bool,
    always_on_top: bool,
    #[cfg_attr(not(windows), allow(dead_code))]
    skip_taskbar: bool,
}

impl NativeOptions {
    fn from_config(config: &WindowConfig) -> Self {
        let mask = config.style_mask;
        Self {
            decorations: !mask.contains(WindowStyleMask::BORDERLESS),
            active: config.can_become_key && !mask.contains(WindowStyleMask::NON_ACTIVATING_PANEL),
            always_on_top: config.level == WindowLevel::Overlay,
            skip_taskbar: config.excluded_from_window_switcher,
        }
    }
}

struct DesktopBackend<'a> {
    target: &'a EventLoopWindowTarget<DesktopEvent>,
    windows: &'a mut Vec<Option<DesktopWindow>>,
}

impl WindowBackend for DesktopBackend<'_> {
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId> {
        let native = NativeOptions::from_config(config);
        let level = if native.always_on_top {
            winit::window::WindowLevel::AlwaysOnTop
        } else {
            winit::window::WindowLevel::Normal
        };

        #[allow(unused_mut)]
        let mut builder = WindowBuilder::new()
            .with_title("HUD alert")
            .with_decorations(native.decorations)
            .with_transparent(true)
            .with_resizable(false)
            .with_visible(false)
            .with_active(native.active)
            .with_window_level(level);

        #[cfg(windows)]
        {
            use winit::platform::windows::WindowBuilderExtWindows;
            builder = builder.with_skip_taskbar(native.skip_taskbar);
        }

        let window = Rc::new(
            builder
                .build(self.target)
                .map_err(|e| AlertError::internal(format!("failed to create alert window: {e}")))?,
        );

        if config.ignores_mouse_events {
            if let Err(e) = window.set_cursor_hittest(false) {
                warn!("Alert window cannot be made click-through: {}", e);
            }
        }

        let context = softbuffer::Context::new(Rc::clone(&window))
            .map_err(|e| AlertError::internal(format!("failed to create render context: {e}")))?;
        let surface = softbuffer::Surface::new(&context, Rc::clone(&window))
            .map_err(|e| AlertError::internal(format!("failed to create render surface: {e}")))?;

        self.windows.push(Some(DesktopWindow {
            window,
            surface,
            _context: context,
            frame: Rect::default(),
            alpha: 0.0,
            scale: 1.0,
            corner_radius: 0.0,
            effect: None,
            layout: None,
            visible: false,
        }));
        Ok(WindowId(self.windows.len() - 1))
    }

    fn close_window(&mut self, id: WindowId) {
        if let Some(slot) = self.windows.get_mut(id.0) {
            // Dropping the winit window closes it
            slot.take();
        }
    }

    fn window(&mut self, id: WindowId) -> Option<&mut dyn OverlayWindow> {
        self.windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .map(|window| window as &mut dyn OverlayWindow)
    }

    /// The primary monitor's logical bounds.
    ///
    /// winit has no work-area or full-screen query, so `visible_frame` equals
    /// `frame` and `is_full_screen` is always false. The safe rect is the
    /// whole monitor; taskbars and docks are cleared only by style margins.
    fn main_screen(&self) -> Option<ScreenInfo> {
        let monitor = self.target.primary_monitor()?;
        let scale = monitor.scale_factor();
        let position = monitor.position().to_logical::<f64>(scale);
        let size = monitor.size().to_logical::<f64>(scale);
        Some(ScreenInfo::new(Rect::new(
            position.x as f32,
            position.y as f32,
            size.width as f32,
            size.height as f32,
        )))
    }
}

struct DesktopWindow {
    window: Rc<Window>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    _context: softbuffer::Context<Rc<Window>>,
    frame: Rect,
    alpha: f32,
    scale: f32,
    corner_radius: f32,
    effect: Option<VisualEffect>,
    layout: Option<ContentLayout>,
    visible: bool,
}

impl DesktopWindow {
    fn background(&self) -> Color {
        match self.effect {
            Some(VisualEffect::HudBlur) => Color::HUD_DARK,
            Some(VisualEffect::Tinted(color)) => color,
            None => self
                .layout
                .as_ref()
                .map_or(Color::HUD_DARK, |layout| layout.background),
        }
    }

    fn paint(&mut self) -> anyhow::Result<()> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };

        let background = self.background();
        let params = PaintParams {
            background,
            alpha: self.alpha,
            scale: self.scale,
            corner_radius: self.corner_radius * self.window.scale_factor() as f32,
        };

        self.surface
            .resize(width, height)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to map surface: {}", e))?;

        paint_layout(
            &mut buffer,
            size.width as usize,
            size.height as usize,
            self.layout.as_ref(),
            &params,
        );

        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present surface: {}", e))?;
        Ok(())
    }
}

impl OverlayWindow for DesktopWindow {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.window
            .set_outer_position(LogicalPosition::new(frame.origin.x, frame.origin.y));
        let _ = self.window.request_inner_size(LogicalSize::new(
            frame.size.width.max(1.0),
            frame.size.height.max(1.0),
        ));
        self.window.request_redraw();
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.window.request_redraw();
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.window.request_redraw();
    }

    fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius;
    }

    fn apply_visual_effect(&mut self, effect: VisualEffect) {
        self.effect = Some(effect);
    }

    fn draw(&mut self, layout: &ContentLayout) {
        self.layout = Some(layout.clone());
        self.window.request_redraw();
    }

    fn order_front(&mut self) {
        self.visible = true;
        self.window.set_visible(true);
        self.window.request_redraw();
    }

    fn order_out(&mut self) {
        self.visible = false;
        self.window.set_visible(false);
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

struct PaintParams {
    background: Color,
    alpha: f32,
    scale: f32,
    /// In buffer pixels
    corner_radius: f32,
}

/// Paint `layout` into a `width` x `height` buffer of `0x00RRGGBB` pixels.
///
/// Layout coordinates are stretched to the buffer, then everything is scaled
/// about the buffer center by `params.scale`.
fn paint_layout(
    pixels: &mut [u32],
    width: usize,
    height: usize,
    layout: Option<&ContentLayout>,
    params: &PaintParams,
) {
    pixels.fill(0);
    let canvas = Rect::new(0.0, 0.0, width as f32, height as f32);
    let center = canvas.center();
    let scale_point = |p: Point| {
        Point::new(
            center.x + (p.x - center.x) * params.scale,
            center.y + (p.y - center.y) * params.scale,
        )
    };
    let map = |rect: Rect, sx: f32, sy: f32| {
        let origin = scale_point(Point::new(rect.origin.x * sx, rect.origin.y * sy));
        Rect::new(
            origin.x,
            origin.y,
            rect.size.width * sx * params.scale,
            rect.size.height * sy * params.scale,
        )
    };

    let body = canvas.scaled_about_center(params.scale);
    let radius = params.corner_radius * params.scale;
    let background = params
        .background
        .with_alpha(params.background.a * params.alpha)
        .to_rgb_u32();
    fill_rect(pixels, width, height, body, radius, background);

    let Some(layout) = layout else {
        return;
    };
    let sx = width as f32 / layout.size.width.max(1.0);
    let sy = height as f32 / layout.size.height.max(1.0);
    let foreground = |opacity: f32| {
        layout
            .foreground
            .with_alpha(layout.foreground.a * opacity * params.alpha)
            .to_rgb_u32()
    };

    for element in &layout.elements {
        let frame = map(element.frame(), sx, sy);
        match element {
            LayoutElement::Icon { .. } => {
                fill_rect(pixels, width, height, frame, frame.size.width / 4.0, foreground(0.9));
            }
            LayoutElement::Label { .. } => {
                fill_rect(pixels, width, height, frame, 2.0, foreground(0.75));
            }
            LayoutElement::ProgressBar { value, .. } => {
                let round = frame.size.height / 2.0;
                fill_rect(pixels, width, height, frame, round, foreground(0.3));
                let filled = Rect {
                    size: crate::geometry::Size::new(frame.size.width * value, frame.size.height),
                    ..frame
                };
                fill_rect(pixels, width, height, filled, round, foreground(1.0));
            }
        }
    }
}

fn fill_rect(pixels: &mut [u32], width: usize, height: usize, rect: Rect, radius: f32, color: u32) {
    let x0 = rect.origin.x.max(0.0).floor() as usize;
    let y0 = rect.origin.y.max(0.0).floor() as usize;
    let x1 = (rect.max_x().min(width as f32).ceil().max(0.0) as usize).min(width);
    let y1 = (rect.max_y().min(height as f32).ceil().max(0.0) as usize).min(height);
    let radius = radius.min(rect.size.width / 2.0).min(rect.size.height / 2.0).max(0.0);

    for y in y0..y1 {
        let row = &mut pixels[y * width..(y + 1) * width];
        for (x, pixel) in row.iter_mut().enumerate().take(x1).skip(x0) {
            if inside_rounded(x as f32 + 0.5, y as f32 + 0.5, rect, radius) {
                *pixel = color;
            }
        }
    }
}

fn inside_rounded(x: f32, y: f32, rect: Rect, radius: f32) -> bool {
    if x < rect.origin.x || y < rect.origin.y || x > rect.max_x() || y > rect.max_y() {
        return false;
    }
    if radius <= 0.0 {
        return true;
    }
    // Distance to the nearest corner circle center, zero along the straight edges
    let dx = (rect.origin.x + radius - x).max(x - (rect.max_x() - radius)).max(0.0);
    let dy = (rect.origin.y + radius - y).max(y - (rect.max_y() - radius)).max(0.0);
    dx * dx + dy * dy <= radius * radius
}
