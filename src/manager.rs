//! Alert pool manager
//!
//! Owns one pool of [`AlertSlot`]s per style type and routes display requests
//! to them. Selection and reservation happen under the pool lock, so
//! concurrent requests never pick a slot at the same time. Pools are bounded:
//! once a style has `capacity` slots and none is reusable, the last slot is
//! reused even if that means cutting its exit animation short of a new show.
//!
//! The manager is an explicitly constructed value. A process-wide default can
//! be installed once with [`install_shared`] and fetched with [`shared`].

use crate::config::HudConfig;
use crate::content::Content;
use crate::error::Result;
use crate::render::{ContentRenderer, LayoutRenderer};
use crate::slot::{AlertPhase, AlertSlot, SlotEnvironment};
use crate::style::{AlertStyle, StyleKey, Transition};
use crate::ui::UiHandle;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_CAPACITY: usize = 10;
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerOptions {
    /// Maximum slots per style, at least 1
    pub capacity: usize,
    pub wait_timeout: Duration,
    pub frame_interval: Duration,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            frame_interval: crate::animation::DEFAULT_FRAME_INTERVAL,
        }
    }
}

impl From<&HudConfig> for ManagerOptions {
    fn from(config: &HudConfig) -> Self {
        Self {
            capacity: config.capacity,
            wait_timeout: config.wait_timeout(),
            frame_interval: config.frame_interval(),
        }
    }
}

struct Inner {
    env: SlotEnvironment,
    options: ManagerOptions,
    pools: Mutex<HashMap<StyleKey, Vec<Arc<AlertSlot>>>>,
}

/// Pool of reusable alert windows, cheap to clone
#[derive(Clone)]
pub struct AlertManager {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for AlertManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertManager")
            .field("options", &self.inner.options)
            .field("active", &self.active_count())
            .finish_non_exhaustive()
    }
}

impl AlertManager {
    pub fn new(ui: UiHandle) -> Self {
        Self::with_options(ui, ManagerOptions::default(), Arc::new(LayoutRenderer))
    }

    pub fn with_config(ui: UiHandle, config: &HudConfig) -> Self {
        Self::with_options(ui, config.into(), Arc::new(LayoutRenderer))
    }

    pub fn with_options(
        ui: UiHandle,
        options: ManagerOptions,
        renderer: Arc<dyn ContentRenderer>,
    ) -> Self {
        let options = ManagerOptions {
            capacity: options.capacity.max(1),
            ..options
        };
        Self {
            inner: Arc::new(Inner {
                env: SlotEnvironment {
                    ui,
                    renderer,
                    frame_interval: options.frame_interval,
                },
                options,
                pools: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn options(&self) -> ManagerOptions {
        self.inner.options
    }

    /// Show `content` without blocking the caller.
    ///
    /// Failures are logged and otherwise dropped.
    pub fn display_alert<S: AlertStyle>(&self, content: Content, style: S) {
        self.display_alert_shared(content, Arc::new(style));
    }

    pub fn display_alert_shared(&self, content: Content, style: Arc<dyn AlertStyle>) {
        let slot = self.reusable_alert(style.key());

        let worker = Arc::clone(&slot);
        let spawned = thread::Builder::new()
            .name("hud-alert".to_string())
            .spawn(move || {
                // show() already logs the failure
                let _ = worker.show(content, style);
            });

        if let Err(e) = spawned {
            error!("Failed to spawn alert thread: {}", e);
            if let Err(err) = slot.dismiss(None) {
                error!(slot = %slot, %err, "failed to release slot");
            }
        }
    }

    /// Show `content` and block until its slot has been dismissed again.
    ///
    /// Gives up with [`AlertError::Timeout`](crate::AlertError::Timeout) after
    /// the configured wait timeout.
    pub fn display_alert_and_wait_until_dismissed<S: AlertStyle>(
        &self,
        content: Content,
        style: S,
    ) -> Result<()> {
        self.display_alert_and_wait_until_dismissed_shared(content, Arc::new(style))
    }

    pub fn display_alert_and_wait_until_dismissed_shared(
        &self,
        content: Content,
        style: Arc<dyn AlertStyle>,
    ) -> Result<()> {
        let slot = self.reusable_alert(style.key());
        let seen = slot.dismissal_count();

        slot.show(content, style)?;
        slot.wait_for_dismissal(seen, self.inner.options.wait_timeout)
    }

    /// Pick the slot for the next alert of `key` and reserve it
    fn reusable_alert(&self, key: StyleKey) -> Arc<AlertSlot> {
        let capacity = self.inner.options.capacity;
        let mut pools = self.inner.pools.lock();
        let pool = pools.entry(key).or_default();

        if let Some(slot) = pool.iter().find(|slot| slot.reserve()) {
            return Arc::clone(slot);
        }

        if pool.len() >= capacity {
            if let Some(last) = pool.last() {
                warn!(slot = %last, capacity, "alert pool exhausted, reusing last slot");
                return Arc::clone(last);
            }
        }

        let slot = Arc::new(AlertSlot::new(key, pool.len(), self.inner.env.clone()));
        slot.reserve();
        pool.push(Arc::clone(&slot));
        debug!(slot = %slot, pool_size = pool.len(), "created alert slot");
        slot
    }

    /// Create `count` slots (and their windows) per style ahead of first use.
    ///
    /// Only the first call on an empty manager does anything.
    pub fn prewarm(&self, styles: &[Arc<dyn AlertStyle>], count: usize) -> Result<()> {
        let mut pools = self.inner.pools.lock();
        if pools.values().any(|pool| !pool.is_empty()) {
            debug!("alert pools already populated, skipping prewarm");
            return Ok(());
        }

        let count = count.min(self.inner.options.capacity);
        for style in styles {
            let key = style.key();
            let pool = pools.entry(key).or_default();
            for index in pool.len()..count {
                let slot = Arc::new(AlertSlot::new(key, index, self.inner.env.clone()));
                pool.push(Arc::clone(&slot));
                slot.prepare_window(style)?;
            }
            info!(style = %key, slots = pool.len(), "prewarmed alert pool");
        }
        Ok(())
    }

    pub fn prewarm_style<S: AlertStyle + Default>(&self, count: usize) -> Result<()> {
        self.prewarm(&[Arc::new(S::default())], count)
    }

    /// Number of slots currently claimed by an alert, across all styles
    pub fn active_count(&self) -> usize {
        self.inner
            .pools
            .lock()
            .values()
            .flatten()
            .filter(|slot| slot.is_in_use())
            .count()
    }

    pub fn slot_count(&self, key: StyleKey) -> usize {
        self.inner.pools.lock().get(&key).map_or(0, Vec::len)
    }

    /// Slots of one style in creation order
    pub fn slots(&self, key: StyleKey) -> Vec<Arc<AlertSlot>> {
        self.inner.pools.lock().get(&key).cloned().unwrap_or_default()
    }

    pub fn slot_phases(&self, key: StyleKey) -> Vec<AlertPhase> {
        self.slots(key).iter().map(|slot| slot.phase()).collect()
    }

    fn all_slots(&self) -> Vec<Arc<AlertSlot>> {
        self.inner.pools.lock().values().flatten().cloned().collect()
    }

    /// Dismiss every alert on screen; slots stay in their pools
    pub fn dismiss_all(&self, transition: Option<Transition>) -> Result<()> {
        let mut first_error = None;
        for slot in self.all_slots() {
            if slot.phase() == AlertPhase::Inactive && !slot.is_in_use() {
                continue;
            }
            if let Err(err) = slot.dismiss(transition) {
                warn!(slot = %slot, %err, "failed to dismiss alert");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Close every window and empty all pools
    pub fn drain(&self) -> Result<()> {
        let pools = std::mem::take(&mut *self.inner.pools.lock());

        let mut closed = 0;
        let mut first_error = None;
        for slot in pools.into_values().flatten() {
            match slot.dispose() {
                Ok(()) => closed += 1,
                Err(err) => {
                    warn!(slot = %slot, %err, "failed to close alert window");
                    first_error.get_or_insert(err);
                }
            }
        }
        info!(slots = closed, "drained alert pools");
        first_error.map_or(Ok(()), Err)
    }
}

static SHARED: OnceCell<AlertManager> = OnceCell::new();

/// Install the process-wide manager; hands it back if one is already installed
pub fn install_shared(manager: AlertManager) -> std::result::Result<(), AlertManager> {
    SHARED.set(manager)
}

pub fn shared() -> Option<&'static AlertManager> {
    SHARED.get()
}
