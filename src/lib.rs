//! HUD Alerts Library
//!
//! Transient, click-through on-screen alerts (volume, brightness, status
//! messages) shown from a bounded pool of reusable overlay windows.
//!
//! - [`AlertManager`] picks a slot per request and drives it
//! - [`AlertSlot`] runs one window through its show/dismiss phases
//! - [`AlertStyle`] describes timing and window treatment
//! - [`ui`] is the single-threaded window domain, [`overlay`] its desktop backend

pub mod animation;
pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod manager;
pub mod overlay;
pub mod render;
pub mod slot;
pub mod style;
pub mod ui;

pub use config::HudConfig;
pub use content::{Content, Symbol};
pub use error::{AlertError, Result};
pub use manager::{AlertManager, ManagerOptions};
pub use slot::{AlertPhase, AlertSlot};
pub use style::{AlertStyle, BannerStyle, ClassicStyle, MinimalStyle, StyleChoice, StyleKey, Transition};
pub use ui::{UiHandle, UiThread};
