use crate::foreground::ForegroundMonitor;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::warn;

/// Evaluates the appointment list of the host on a fixed short cadence
pub fn start_monitor_job(monitor: ForegroundMonitor) {
    let period = monitor.context().config.monitor_interval_millis as u64;
    actix_web::rt::spawn(async move {
        let mut ticks = interval(Duration::from_millis(period));
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            monitor.tick().await;
        }
    });
}

/// Keeps the worker awake and in sync while the page is visible
pub fn start_heartbeat_job(monitor: ForegroundMonitor) {
    let period = monitor.context().config.heartbeat_interval_millis as u64;
    actix_web::rt::spawn(async move {
        let mut ticks = interval(Duration::from_millis(period));
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            if !monitor.is_visible() {
                continue;
            }
            if let Err(e) = monitor.heartbeat() {
                warn!("Heartbeat job stops: {}", e);
                return;
            }
        }
    });
}
