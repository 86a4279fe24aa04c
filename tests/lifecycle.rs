//! Alert lifecycle against the headless backend

use hud_alerts::geometry::{Anchor, Placement, Rect, ScreenInfo};
use hud_alerts::render::{LayoutElement, LayoutRenderer};
use hud_alerts::style::WindowContext;
use hud_alerts::ui::headless::{HeadlessBackend, HeadlessProbe, DEFAULT_SCREEN};
use hud_alerts::{
    AlertError, AlertManager, AlertPhase, AlertStyle, BannerStyle, Content, ManagerOptions,
    StyleKey, Transition, UiThread,
};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Style with test-sized timings
#[derive(Debug, Clone)]
struct QuickStyle {
    transition_in: Option<Transition>,
    duration: Duration,
    transition_out: Option<Transition>,
}

impl QuickStyle {
    fn new(in_ms: u64, duration_ms: u64, out_ms: u64) -> Self {
        Self {
            transition_in: Some(Transition::fade(Duration::from_millis(in_ms))),
            duration: Duration::from_millis(duration_ms),
            transition_out: Some(Transition::fade(Duration::from_millis(out_ms))),
        }
    }
}

impl AlertStyle for QuickStyle {
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
        context.set_corner_radius(10.0);
    }

    fn update_window(&self, context: &mut WindowContext<'_>) {
        context.set_placement(Placement::new(Anchor::Center, 0.0));
    }
}

fn quick_key() -> StyleKey {
    StyleKey::of::<QuickStyle>()
}

fn setup_with(capacity: usize, wait_timeout: Duration) -> (AlertManager, HeadlessProbe) {
    let backend = HeadlessBackend::new();
    let probe = backend.probe();
    let ui = UiThread::spawn(move || backend).unwrap().into_handle();
    let manager = AlertManager::with_options(
        ui,
        ManagerOptions {
            capacity,
            wait_timeout,
            frame_interval: Duration::from_millis(5),
        },
        Arc::new(LayoutRenderer),
    );
    (manager, probe)
}

fn setup(capacity: usize) -> (AlertManager, HeadlessProbe) {
    setup_with(capacity, Duration::from_secs(10))
}

fn wait_for(what: &str, timeout: Duration, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + timeout;
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(1));
    }
}

fn phase_of(manager: &AlertManager, index: usize) -> Option<AlertPhase> {
    manager.slot_phases(quick_key()).get(index).copied()
}

#[test]
fn test_single_alert_runs_full_lifecycle() {
    let (manager, probe) = setup(10);
    manager.display_alert(Content::text("Volume"), QuickStyle::new(20, 150, 300));

    wait_for("static display", Duration::from_secs(5), || {
        phase_of(&manager, 0) == Some(AlertPhase::StaticallyDisplayed)
    });
    assert_eq!(manager.slot_count(quick_key()), 1);
    assert_eq!(manager.active_count(), 1);

    let slot = Arc::clone(&manager.slots(quick_key())[0]);
    let window = slot.window_id().unwrap();
    let record = probe.window(window).unwrap();
    assert!(record.visible);
    assert_eq!(record.alpha, 1.0);
    assert_eq!(record.corner_radius, 10.0);
    let layout = record.layout.unwrap();
    assert!(matches!(
        &layout.elements[0],
        LayoutElement::Label { text, .. } if text == "Volume"
    ));

    wait_for("exit animation", Duration::from_secs(5), || {
        phase_of(&manager, 0) == Some(AlertPhase::TransitioningOut)
    });
    wait_for("inactive", Duration::from_secs(5), || {
        phase_of(&manager, 0) == Some(AlertPhase::Inactive)
    });

    let record = probe.window(window).unwrap();
    assert!(!record.visible);
    assert_eq!(record.alpha, 0.0);
    assert_eq!(record.scale, 1.0);
    assert_eq!(slot.dismissal_count(), 1);
    assert_eq!(manager.active_count(), 0);
}

#[test]
fn test_phases_advance_in_order() {
    let (manager, _probe) = setup(10);
    let style = QuickStyle::new(60, 60, 60);

    let watcher = {
        let manager = manager.clone();
        thread::spawn(move || {
            let mut seen = vec![AlertPhase::Inactive];
            let deadline = Instant::now() + Duration::from_secs(5);
            while Instant::now() < deadline {
                if let Some(phase) = phase_of(&manager, 0) {
                    if seen.last() != Some(&phase) {
                        seen.push(phase);
                    }
                    if seen.len() > 1 && phase == AlertPhase::Inactive {
                        break;
                    }
                }
                thread::sleep(Duration::from_micros(200));
            }
            seen
        })
    };

    manager
        .display_alert_and_wait_until_dismissed(Content::text("Brightness"), style)
        .unwrap();
    let seen = watcher.join().unwrap();

    let order = [
        AlertPhase::Inactive,
        AlertPhase::PreparingWindow,
        AlertPhase::TransitioningIn,
        AlertPhase::StaticallyDisplayed,
        AlertPhase::TransitioningOut,
        AlertPhase::Inactive,
    ];
    let mut cursor = 0;
    for phase in &seen {
        let position = order[cursor..]
            .iter()
            .position(|p| p == phase)
            .unwrap_or_else(|| panic!("phase {phase:?} out of order in {seen:?}"));
        cursor += position;
    }
    assert!(seen.contains(&AlertPhase::StaticallyDisplayed), "{seen:?}");
    assert_eq!(seen.last(), Some(&AlertPhase::Inactive));
}

#[test]
fn test_rapid_alerts_reuse_slot_and_dismiss_once() {
    let (manager, _probe) = setup(10);
    let style = QuickStyle::new(20, 400, 50);

    manager.display_alert(Content::text("First"), style.clone());
    wait_for("first alert on screen", Duration::from_secs(5), || {
        phase_of(&manager, 0) == Some(AlertPhase::StaticallyDisplayed)
    });
    let first_static = Instant::now();

    thread::sleep(Duration::from_millis(250));
    manager.display_alert(Content::text("Second"), style);
    assert_eq!(manager.slot_count(quick_key()), 1);

    let slot = Arc::clone(&manager.slots(quick_key())[0]);
    wait_for("second content", Duration::from_secs(5), || {
        slot.content() == Some(Content::text("Second"))
            && slot.phase() == AlertPhase::StaticallyDisplayed
    });

    // Past the first alert's deadline the slot must still be on screen
    let past_first = first_static + Duration::from_millis(450);
    if let Some(remaining) = past_first.checked_duration_since(Instant::now()) {
        thread::sleep(remaining);
    }
    assert_eq!(slot.phase(), AlertPhase::StaticallyDisplayed);
    assert_eq!(slot.dismissal_count(), 0);

    wait_for("dismissal", Duration::from_secs(5), || {
        slot.phase() == AlertPhase::Inactive
    });
    thread::sleep(Duration::from_millis(500));
    assert_eq!(slot.dismissal_count(), 1);
    assert_eq!(manager.slot_count(quick_key()), 1);
}

#[test]
fn test_prewarm_creates_inactive_slots() {
    let (manager, probe) = setup(10);
    let style: Arc<dyn AlertStyle> = Arc::new(QuickStyle::new(20, 100, 20));

    manager.prewarm(&[style], 3).unwrap();

    assert_eq!(manager.slot_phases(quick_key()), vec![AlertPhase::Inactive; 3]);
    assert_eq!(manager.active_count(), 0);
    assert_eq!(probe.window_count(), 3);
    assert_eq!(probe.visible_window_count(), 0);

    // Windows were set up once and are reused by the first alert
    manager.display_alert(Content::text("Volume"), QuickStyle::new(20, 100, 20));
    wait_for("alert on screen", Duration::from_secs(5), || {
        phase_of(&manager, 0) == Some(AlertPhase::StaticallyDisplayed)
    });
    assert_eq!(probe.window_count(), 3);
}

#[test]
fn test_concurrent_alerts_respect_capacity() {
    let (manager, _probe) = setup(10);
    let style = QuickStyle::new(20, 200, 20);

    let handles: Vec<_> = (0..15)
        .map(|i| {
            let manager = manager.clone();
            let style = style.clone();
            thread::spawn(move || {
                manager.display_alert(Content::text_and_progress("Volume", i as f32 / 15.0), style)
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(manager.slot_count(quick_key()) <= 10);
    wait_for("all dismissed", Duration::from_secs(10), || {
        manager.slot_phases(quick_key()).iter().all(|p| *p == AlertPhase::Inactive)
            && manager.active_count() == 0
    });
    assert!(manager.slot_count(quick_key()) <= 10);
}

#[test]
fn test_alert_storm_never_exceeds_capacity() {
    let (manager, _probe) = setup(3);
    // Long exit animations keep slots unavailable so the pool has to grow
    let style = QuickStyle::new(10, 10, 500);

    for i in 0..30 {
        manager.display_alert(Content::progress(i as f32 / 30.0), style.clone());
        assert!(manager.slot_count(quick_key()) <= 3);
        thread::sleep(Duration::from_millis(40));
    }

    assert!(manager.slot_count(quick_key()) <= 3);
    wait_for("storm settled", Duration::from_secs(10), || {
        manager.slot_phases(quick_key()).iter().all(|p| *p == AlertPhase::Inactive)
    });
    assert_eq!(manager.active_count(), 0);
}

#[test]
fn test_wait_returns_after_dismissal() {
    let (manager, probe) = setup(10);

    let started = Instant::now();
    manager
        .display_alert_and_wait_until_dismissed(Content::text("Saved"), QuickStyle::new(20, 100, 50))
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(150));

    let slot = Arc::clone(&manager.slots(quick_key())[0]);
    assert_eq!(slot.phase(), AlertPhase::Inactive);
    assert_eq!(slot.dismissal_count(), 1);
    assert_eq!(probe.visible_window_count(), 0);
}

#[test]
fn test_wait_times_out() {
    let (manager, _probe) = setup_with(10, Duration::from_millis(100));

    let err = manager
        .display_alert_and_wait_until_dismissed(Content::text("Stuck"), QuickStyle::new(10, 3000, 10))
        .unwrap_err();
    assert_eq!(err, AlertError::Timeout(Duration::from_millis(100)));
    assert_eq!(phase_of(&manager, 0), Some(AlertPhase::StaticallyDisplayed));
}

#[test]
fn test_missing_screen_fails_and_slot_recovers() {
    let (manager, probe) = setup(10);
    probe.set_screen(None);

    let err = manager
        .display_alert_and_wait_until_dismissed(Content::text("Nowhere"), QuickStyle::new(10, 50, 10))
        .unwrap_err();
    assert!(matches!(err, AlertError::InternalInconsistency(_)));
    assert_eq!(phase_of(&manager, 0), Some(AlertPhase::Inactive));
    assert_eq!(manager.active_count(), 0);

    probe.set_screen(Some(DEFAULT_SCREEN));
    manager
        .display_alert_and_wait_until_dismissed(Content::text("Back"), QuickStyle::new(10, 50, 10))
        .unwrap();
    assert_eq!(manager.slot_count(quick_key()), 1);
}

#[test]
fn test_full_screen_uses_whole_frame() {
    let (manager, probe) = setup(10);
    let banner = || BannerStyle {
        transition_in: None,
        duration: Duration::from_secs(30),
        transition_out: None,
        ..BannerStyle::default()
    };
    let key = StyleKey::of::<BannerStyle>();

    manager.display_alert(Content::text("Wi-Fi"), banner());
    wait_for("banner on screen", Duration::from_secs(5), || {
        manager.slot_phases(key).first() == Some(&AlertPhase::StaticallyDisplayed)
    });
    let window = manager.slots(key)[0].window_id().unwrap();
    assert_eq!(probe.window(window).unwrap().frame.origin.y, 37.0);

    probe.set_screen(Some(ScreenInfo {
        is_full_screen: true,
        ..DEFAULT_SCREEN
    }));
    manager.display_alert(Content::text("Wi-Fi"), banner());
    wait_for("banner moved", Duration::from_secs(5), || {
        probe.window(window).map(|r| r.frame.origin.y) == Some(12.0)
    });

    let frame = probe.window(window).unwrap().frame;
    assert!(Rect::new(0.0, 0.0, 1440.0, 900.0).contains_rect(&frame));
    manager.dismiss_all(None).unwrap();
}

#[test]
fn test_dismiss_all_and_drain() {
    let (manager, probe) = setup(10);
    manager.display_alert(Content::text("One"), QuickStyle::new(10, 5000, 10));
    manager.display_alert(Content::text("Caps Lock"), BannerStyle::default());

    wait_for("both on screen", Duration::from_secs(5), || {
        probe.visible_window_count() == 2
    });

    manager
        .dismiss_all(Some(Transition::fade(Duration::from_millis(20))))
        .unwrap();
    assert_eq!(probe.visible_window_count(), 0);
    assert_eq!(manager.active_count(), 0);
    assert_eq!(manager.slot_count(quick_key()), 1);

    manager.drain().unwrap();
    assert_eq!(manager.slot_count(quick_key()), 0);
    assert_eq!(manager.slot_count(StyleKey::of::<BannerStyle>()), 0);
    assert_eq!(probe.open_window_count(), 0);
}

#[test]
fn test_shared_manager_installs_once() {
    let (manager, _probe) = setup(10);
    let (other, _other_probe) = setup(4);

    hud_alerts::manager::install_shared(manager).unwrap();
    assert!(hud_alerts::manager::install_shared(other).is_err());

    let shared = hud_alerts::manager::shared().unwrap();
    assert_eq!(shared.options().capacity, 10);
}
