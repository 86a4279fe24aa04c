//! HudAlerts demo
//!
//! Opens the desktop overlay and plays a short alert sequence:
//! - a volume sweep through the configured default style (rapid reuse of one slot)
//! - a banner, waited on until it has been dismissed
//! - a final minimal alert, then drains the pool and exits
//!
//! Set `RUST_LOG=hud_alerts=trace` to watch the phase changes.

use anyhow::Context;
use hud_alerts::config::load_config;
use hud_alerts::overlay::{DesktopOverlay, DesktopUi};
use hud_alerts::{AlertManager, BannerStyle, Content, HudConfig, MinimalStyle, UiHandle};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hud_alerts=debug,info")),
        )
        .init();

    tracing::info!("HudAlerts demo starting...");

    let config = load_config();
    let (overlay, ui) = DesktopOverlay::new()?;
    let manager = AlertManager::with_config(UiHandle::new(ui.clone()), &config);

    let driver = Arc::clone(&ui);
    thread::Builder::new()
        .name("hud-demo".to_string())
        .spawn(move || {
            if let Err(e) = play(&manager, &config) {
                tracing::error!("Demo sequence failed: {:#}", e);
            }
            if let Err(e) = manager.drain() {
                tracing::warn!("Failed to drain alert pool: {}", e);
            }
            finish(&driver);
        })
        .context("Failed to spawn demo thread")?;

    // The event loop owns the main thread until the demo calls exit
    overlay.run()
}

fn play(manager: &AlertManager, config: &HudConfig) -> anyhow::Result<()> {
    let style = config.default_style.style();
    if config.prewarm > 0 {
        manager
            .prewarm(&[Arc::clone(&style)], config.prewarm)
            .context("Failed to prewarm alert windows")?;
    }

    for step in 0..=10 {
        let level = step as f32 / 10.0;
        manager.display_alert_shared(
            Content::image_and_progress("speaker.wave.2", level),
            Arc::clone(&style),
        );
        thread::sleep(Duration::from_millis(120));
    }
    tracing::info!(active = manager.active_count(), "volume sweep sent");
    thread::sleep(style.duration() + Duration::from_secs(1));

    manager
        .display_alert_and_wait_until_dismissed(
            Content::text_and_image("Connected", "headphones"),
            BannerStyle::default(),
        )
        .context("Banner alert did not complete")?;

    manager
        .display_alert_and_wait_until_dismissed(Content::text("Caps Lock On"), MinimalStyle::default())
        .context("Minimal alert did not complete")?;

    Ok(())
}

fn finish(ui: &DesktopUi) {
    tracing::info!("Demo finished, closing overlay");
    ui.exit();
}
