use super::*;
use crate::shared::test_utils::*;
use reminder_scheduler_domain::{AppointmentStatus, Locale, Permission};
use reminder_scheduler_infra::{INotifier, InMemoryAppointmentSource};
use std::sync::Arc;
use tokio::time::sleep;

fn secs(secs: u64) -> Duration {
    Duration::from_secs(secs)
}

/// Sleeps until `secs` after the start of the test
async fn sleep_until_secs(t: &TestContext, secs: i64) {
    let now = t.ctx.sys.get_timestamp_millis();
    let target = BASE_TS + secs * 1000;
    assert!(target > now, "Test tried to travel back in time");
    sleep(Duration::from_millis((target - now) as u64)).await;
}

#[tokio::test(start_paused = true)]
async fn it_starts_idle_without_persisted_config() {
    let t = setup();
    let worker = Worker::spawn(t.ctx.clone());

    let status = worker.status().await.unwrap();
    assert_eq!(status.state, WorkerState::Idle);
    assert_eq!(status.owner_id, None);
    assert_eq!(status.cycles_completed, 0);
}

#[tokio::test(start_paused = true)]
async fn it_fires_reminder_inside_window_immediately() {
    let t = setup();
    let config = scheduler_config("owner-1");
    t.source.set_appointments(
        &config.owner_id,
        vec![appointment("a1", BASE_TS + 14 * MINUTE, Some("c1"))],
    );
    t.source.set_subject_name(&id("c1"), "Jane Doe");

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config).unwrap();
    sleep(secs(1)).await;

    let shown = t.notifier.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].body, "You have a session with Jane Doe in 14 minutes!");
    assert_eq!(shown[0].tag, "a1_15");

    let persisted = t
        .ctx
        .repos
        .reminder_state_repo
        .load_notified()
        .await
        .unwrap();
    assert!(persisted.contains(&AlertId::new(&id("a1"), 15)));

    let status = worker.status().await.unwrap();
    assert_eq!(status.state, WorkerState::Polling);
    assert_eq!(status.owner_id, Some(id("owner-1")));
    assert_eq!(status.notified_count, 1);
    assert_eq!(status.cycles_completed, 1);
}

#[tokio::test(start_paused = true)]
async fn it_arms_timer_when_reminder_is_imminent() {
    let t = setup();
    let config = scheduler_config("owner-1");
    // Reminder moment is 25 minutes (1500 s) from now
    t.source.set_appointments(
        &config.owner_id,
        vec![appointment("a1", BASE_TS + 40 * MINUTE, None)],
    );

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config).unwrap();

    // The cycle at 1375 s is still more than two poll intervals away
    sleep_until_secs(&t, 1400).await;
    assert!(t.notifier.shown().is_empty());
    assert_eq!(worker.status().await.unwrap().pending_timers, 0);

    // The cycle at 1430 s arms a timer for 70 s
    sleep_until_secs(&t, 1450).await;
    assert_eq!(worker.status().await.unwrap().pending_timers, 1);

    sleep_until_secs(&t, 1499).await;
    assert!(t.notifier.shown().is_empty());
    assert_eq!(worker.status().await.unwrap().pending_timers, 1);

    sleep_until_secs(&t, 1501).await;
    let shown = t.notifier.shown();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].body.contains("15"));
    let status = worker.status().await.unwrap();
    assert_eq!(status.pending_timers, 0);
    assert_eq!(status.notified_count, 1);

    // Later cycles do not fire again
    sleep_until_secs(&t, 2400).await;
    assert_eq!(t.notifier.shown().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn it_never_fires_twice_across_cycles_and_restarts() {
    let t = setup();
    let config = scheduler_config("owner-1");
    t.source.set_appointments(
        &config.owner_id,
        vec![appointment("a1", BASE_TS + 14 * MINUTE, None)],
    );

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config).unwrap();
    sleep(secs(5 * 60)).await;
    assert_eq!(t.notifier.shown().len(), 1);
    assert!(worker.status().await.unwrap().cycles_completed > 5);
    drop(worker);

    // A new worker resumes from the persisted config and notified set
    let worker = Worker::spawn(t.ctx.clone());
    sleep(secs(1)).await;
    let status = worker.status().await.unwrap();
    assert_eq!(status.state, WorkerState::Polling);
    assert_eq!(status.owner_id, Some(id("owner-1")));

    sleep(secs(3 * 60)).await;
    assert_eq!(t.notifier.shown().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn it_never_fires_for_started_or_inactive_appointments() {
    let t = setup();
    let config = scheduler_config("owner-1");
    let mut cancelled = appointment("a3", BASE_TS + 5 * MINUTE, None);
    cancelled.status = AppointmentStatus::Cancelled;
    t.source.set_appointments(
        &config.owner_id,
        vec![
            appointment("a1", BASE_TS - MINUTE, None),
            appointment("a2", BASE_TS, None),
            cancelled,
        ],
    );

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config).unwrap();
    sleep(secs(10 * 60)).await;

    assert!(t.notifier.shown().is_empty());
    assert_eq!(worker.status().await.unwrap().notified_count, 0);
}

#[tokio::test(start_paused = true)]
async fn it_forgets_everything_on_clear_config() {
    let t = setup();
    let owner1 = scheduler_config("owner-1");
    let owner2 = scheduler_config("owner-2");
    t.source.set_appointments(
        &owner1.owner_id,
        vec![
            appointment("a1", BASE_TS + 40 * MINUTE, None),
            appointment("a2", BASE_TS + 5 * MINUTE, None),
        ],
    );
    t.source.set_appointments(
        &owner2.owner_id,
        vec![appointment("b1", BASE_TS + 30 * MINUTE, None)],
    );

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(owner1).unwrap();
    sleep_until_secs(&t, 1450).await;
    let status = worker.status().await.unwrap();
    assert_eq!(status.pending_timers, 1);
    assert_eq!(status.notified_count, 1);

    worker.clear_config().unwrap();
    let status = worker.status().await.unwrap();
    assert_eq!(status.state, WorkerState::Stopped);
    assert_eq!(status.owner_id, None);
    assert_eq!(status.pending_timers, 0);
    assert_eq!(status.notified_count, 0);

    let repo = &t.ctx.repos.reminder_state_repo;
    assert!(repo.load_config().await.unwrap().is_none());
    assert!(repo.load_notified().await.unwrap().is_empty());

    worker.set_config(owner2).unwrap();
    sleep_until_secs(&t, 1600).await;
    let status = worker.status().await.unwrap();
    assert_eq!(status.state, WorkerState::Polling);
    assert_eq!(status.owner_id, Some(id("owner-2")));

    let tags = t
        .notifier
        .shown()
        .into_iter()
        .map(|n| n.tag)
        .collect::<Vec<_>>();
    assert_eq!(tags, vec!["a2_15".to_string(), "b1_15".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn it_skips_cycles_while_fetching_fails() {
    let t = setup();
    let config = scheduler_config("owner-1");
    t.source.set_appointments(
        &config.owner_id,
        vec![appointment("a1", BASE_TS + 10 * MINUTE, None)],
    );
    t.source
        .set_failure(Some(FetchError::Network("connection refused".into())));

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config).unwrap();
    sleep_until_secs(&t, 100).await;

    assert!(t.notifier.shown().is_empty());
    assert_eq!(t.source.fetch_count(), 2);
    let status = worker.status().await.unwrap();
    assert_eq!(status.state, WorkerState::Polling);
    assert_eq!(status.cycles_completed, 0);

    t.source.set_failure(None);
    sleep_until_secs(&t, 120).await;
    assert_eq!(t.notifier.shown().len(), 1);
}

struct SlowSource {
    inner: Arc<InMemoryAppointmentSource>,
    delay: Duration,
}

#[async_trait::async_trait]
impl IAppointmentSource for SlowSource {
    async fn fetch_upcoming_appointments(
        &self,
        config: &SchedulerConfig,
        span: &TimeSpan,
    ) -> Result<Vec<Appointment>, FetchError> {
        sleep(self.delay).await;
        self.inner.fetch_upcoming_appointments(config, span).await
    }

    async fn fetch_subject_names(
        &self,
        config: &SchedulerConfig,
        subject_ids: &[ID],
    ) -> Result<HashMap<ID, String>, FetchError> {
        self.inner.fetch_subject_names(config, subject_ids).await
    }
}

#[tokio::test(start_paused = true)]
async fn it_discards_fetch_results_after_clear_config() {
    let mut t = setup();
    let config = scheduler_config("owner-1");
    t.source.set_appointments(
        &config.owner_id,
        vec![appointment("a1", BASE_TS + 10 * MINUTE, None)],
    );
    t.ctx.services.appointment_source = Arc::new(SlowSource {
        inner: t.source.clone(),
        delay: secs(10),
    });

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config).unwrap();
    sleep(secs(1)).await;
    worker.clear_config().unwrap();
    sleep(secs(20)).await;

    assert!(t.notifier.shown().is_empty());
    let status = worker.status().await.unwrap();
    assert_eq!(status.state, WorkerState::Stopped);
    assert_eq!(status.cycles_completed, 0);
}

#[tokio::test(start_paused = true)]
async fn it_keeps_reminder_pending_while_permission_is_denied() {
    let t = setup();
    let config = scheduler_config("owner-1");
    t.source.set_appointments(
        &config.owner_id,
        vec![appointment("a1", BASE_TS + 10 * MINUTE, None)],
    );
    t.notifier.set_permission(Permission::Denied);

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config).unwrap();
    sleep(secs(1)).await;
    assert!(t.notifier.shown().is_empty());
    assert_eq!(worker.status().await.unwrap().notified_count, 0);

    t.notifier.set_permission(Permission::Granted);
    sleep(secs(60)).await;
    assert_eq!(t.notifier.shown().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn it_cancels_timer_of_removed_appointment() {
    let t = setup();
    let config = scheduler_config("owner-1");
    t.source.set_appointments(
        &config.owner_id,
        vec![appointment("a1", BASE_TS + 40 * MINUTE, None)],
    );

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config.clone()).unwrap();
    sleep_until_secs(&t, 1440).await;
    assert_eq!(worker.status().await.unwrap().pending_timers, 1);

    t.source.set_appointments(&config.owner_id, vec![]);
    sleep_until_secs(&t, 1490).await;
    assert_eq!(worker.status().await.unwrap().pending_timers, 0);

    sleep_until_secs(&t, 1600).await;
    assert!(t.notifier.shown().is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_keeps_polling_when_config_is_resent() {
    let t = setup();
    let mut config = scheduler_config("owner-1");
    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config.clone()).unwrap();
    sleep(secs(1)).await;

    config.locale = Locale::Tr;
    worker.set_config(config.clone()).unwrap();
    worker.heartbeat().unwrap();
    sleep_until_secs(&t, 200).await;

    // One poll chain: cycles at 0, 55, 110 and 165 seconds
    assert_eq!(t.source.fetch_count(), 4);
    let status = worker.status().await.unwrap();
    assert!(status.last_heartbeat_ts.is_some());

    let persisted = t
        .ctx
        .repos
        .reminder_state_repo
        .load_config()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(persisted.locale, Locale::Tr);
}

#[tokio::test(start_paused = true)]
async fn it_shows_notifications_on_behalf_of_the_monitor() {
    let t = setup();
    let worker = Worker::spawn(t.ctx.clone());
    let notification = Notification::test(Locale::En, "/", BASE_TS);
    worker.show_notification(notification.clone()).unwrap();
    sleep(secs(1)).await;

    assert_eq!(t.notifier.shown(), vec![notification]);
}

/// Never answers the first fetch
struct HangingSource {
    inner: Arc<InMemoryAppointmentSource>,
    hung: std::sync::atomic::AtomicBool,
}

#[async_trait::async_trait]
impl IAppointmentSource for HangingSource {
    async fn fetch_upcoming_appointments(
        &self,
        config: &SchedulerConfig,
        span: &TimeSpan,
    ) -> Result<Vec<Appointment>, FetchError> {
        if !self.hung.swap(true, std::sync::atomic::Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.inner.fetch_upcoming_appointments(config, span).await
    }

    async fn fetch_subject_names(
        &self,
        config: &SchedulerConfig,
        subject_ids: &[ID],
    ) -> Result<HashMap<ID, String>, FetchError> {
        self.inner.fetch_subject_names(config, subject_ids).await
    }
}

#[tokio::test(start_paused = true)]
async fn it_keeps_polling_after_a_fetch_that_never_answers() {
    let mut t = setup();
    let config = scheduler_config("owner-1");
    t.source.set_appointments(
        &config.owner_id,
        vec![appointment("a1", BASE_TS + 30 * MINUTE, None)],
    );
    t.ctx.services.appointment_source = Arc::new(HangingSource {
        inner: t.source.clone(),
        hung: std::sync::atomic::AtomicBool::new(false),
    });

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config).unwrap();
    sleep(secs(30)).await;
    let status = worker.status().await.unwrap();
    assert_eq!(status.state, WorkerState::Polling);
    assert_eq!(status.cycles_completed, 0);

    // The hanging cycle is given up after one poll interval
    sleep_until_secs(&t, 120).await;
    assert!(worker.status().await.unwrap().cycles_completed >= 1);
    assert!(t.source.fetch_count() >= 1);

    sleep_until_secs(&t, 1000).await;
    let shown = t.notifier.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].tag, "a1_15");
}

/// Never answers a show call
struct HangingNotifier;

#[async_trait::async_trait]
impl INotifier for HangingNotifier {
    async fn permission(&self) -> Permission {
        Permission::Granted
    }

    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn show(&self, _notification: &Notification) -> Result<(), NotifyError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn it_answers_messages_while_notifier_hangs() {
    let mut t = setup();
    let config = scheduler_config("owner-1");
    t.source.set_appointments(
        &config.owner_id,
        vec![appointment("a1", BASE_TS + 5 * MINUTE, None)],
    );
    t.ctx.services.notifier = Arc::new(HangingNotifier);

    let worker = Worker::spawn(t.ctx.clone());
    worker.set_config(config).unwrap();
    sleep(secs(1)).await;

    let status = worker.status().await.unwrap();
    assert_eq!(status.notified_count, 0);
    assert_eq!(status.cycles_completed, 1);

    worker.clear_config().unwrap();
    assert_eq!(worker.status().await.unwrap().state, WorkerState::Stopped);
}
