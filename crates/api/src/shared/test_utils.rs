use reminder_scheduler_domain::{
    Appointment, AppointmentStatus, Locale, SchedulerConfig, Tz, ID,
};
use reminder_scheduler_infra::{
    ISys, InMemoryAppointmentSource, InMemoryNotifier, ReminderContext,
};
use std::sync::Arc;
use tokio::time::Instant;

pub const MINUTE: i64 = 1000 * 60;
/// 2021-02-21T10:00:00Z
pub const BASE_TS: i64 = 1613901600000;

/// Clock that follows the tokio clock, so that a paused runtime also
/// controls what the scheduler believes the time is
pub struct VirtualSys {
    base_ts: i64,
    start: Instant,
}

impl VirtualSys {
    pub fn new(base_ts: i64) -> Self {
        Self {
            base_ts,
            start: Instant::now(),
        }
    }
}

impl ISys for VirtualSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.base_ts + self.start.elapsed().as_millis() as i64
    }
}

pub struct TestContext {
    pub ctx: ReminderContext,
    pub source: Arc<InMemoryAppointmentSource>,
    pub notifier: Arc<InMemoryNotifier>,
}

pub fn setup() -> TestContext {
    let source = Arc::new(InMemoryAppointmentSource::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let mut ctx = ReminderContext::create_inmemory(source.clone(), notifier.clone());
    ctx.sys = Arc::new(VirtualSys::new(BASE_TS));
    ctx.config.reminder_window_minutes = 15;
    ctx.config.poll_interval_millis = 55 * 1000;
    ctx.config.monitor_interval_millis = 30 * 1000;
    ctx.config.heartbeat_interval_millis = 50 * 1000;
    ctx.config.lookahead_days = 2;
    ctx.config.app_url = "/".into();

    TestContext {
        ctx,
        source,
        notifier,
    }
}

pub fn id(value: &str) -> ID {
    value.parse().unwrap()
}

pub fn scheduler_config(owner_id: &str) -> SchedulerConfig {
    SchedulerConfig::new(
        "https://test.supabase.co".into(),
        "anon-key".into(),
        id(owner_id),
        Locale::En,
        Tz::UTC,
    )
    .unwrap()
}

pub fn appointment(appointment_id: &str, scheduled_ts: i64, subject_id: Option<&str>) -> Appointment {
    Appointment {
        id: id(appointment_id),
        scheduled_ts,
        subject_id: subject_id.map(id),
        status: AppointmentStatus::Scheduled,
    }
}
