use crate::worker::{WorkerGone, WorkerHandle};
use reminder_scheduler_domain::{
    upcoming::evaluate, AlertId, Appointment, Locale, Notification, Permission,
    SchedulerConfig, UpcomingAlert, UpcomingAlerts, ID,
};
use reminder_scheduler_infra::{NotifyError, ReminderContext};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, warn};

#[derive(Default)]
struct MonitorSession {
    config: Option<SchedulerConfig>,
    appointments: Vec<Appointment>,
    subject_names: HashMap<ID, String>,
    visible: bool,
    /// Reminders this session already showed. Not persisted.
    shown: HashSet<AlertId>,
}

struct MonitorInner {
    ctx: ReminderContext,
    worker: WorkerHandle,
    session: Mutex<MonitorSession>,
    upcoming: watch::Sender<UpcomingAlerts>,
}

/// The in-page half of the scheduler.
///
/// Evaluates the appointment list held by the host to drive the reminder
/// list of the UI, and keeps the worker informed and awake.
#[derive(Clone)]
pub struct ForegroundMonitor {
    inner: Arc<MonitorInner>,
}

impl ForegroundMonitor {
    pub fn new(ctx: ReminderContext, worker: WorkerHandle) -> Self {
        let (upcoming, _) = watch::channel(UpcomingAlerts::new());
        Self {
            inner: Arc::new(MonitorInner {
                ctx,
                worker,
                session: Mutex::new(MonitorSession {
                    visible: true,
                    ..Default::default()
                }),
                upcoming,
            }),
        }
    }

    fn session(&self) -> MutexGuard<'_, MonitorSession> {
        // The session holds no invariants that a panicking holder could break
        self.inner
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn now(&self) -> i64 {
        self.inner.ctx.sys.get_timestamp_millis()
    }

    pub fn worker(&self) -> &WorkerHandle {
        &self.inner.worker
    }

    pub fn context(&self) -> &ReminderContext {
        &self.inner.ctx
    }

    /// Called on login
    pub fn set_config(&self, config: SchedulerConfig) -> Result<(), WorkerGone> {
        self.session().config = Some(config.clone());
        self.inner.worker.set_config(config)
    }

    /// Called on logout. Stops the worker and forgets the session.
    pub fn clear_config(&self) -> Result<(), WorkerGone> {
        {
            let mut session = self.session();
            session.config = None;
            session.appointments.clear();
            session.subject_names.clear();
            session.shown.clear();
        }
        self.inner.upcoming.send_modify(|upcoming| upcoming.clear());
        self.inner.worker.clear_config()
    }

    pub fn config(&self) -> Option<SchedulerConfig> {
        self.session().config.clone()
    }

    /// Replaces the appointment list held by the host and evaluates it
    pub async fn set_appointments(
        &self,
        appointments: Vec<Appointment>,
        subject_names: HashMap<ID, String>,
    ) -> UpcomingAlerts {
        {
            let mut session = self.session();
            session.appointments = appointments;
            session.subject_names = subject_names;
        }
        self.evaluate_now().await;
        self.upcoming()
    }

    /// One tick of the evaluation cadence. Only evaluates while the page is
    /// visible, otherwise just drops entries whose appointment started.
    pub async fn tick(&self) {
        if self.session().visible {
            self.evaluate_now().await;
        } else {
            let now = self.now();
            self.inner
                .upcoming
                .send_if_modified(|upcoming| upcoming.drop_started(now));
        }
    }

    pub async fn on_visibility_change(&self, visible: bool) -> Result<(), WorkerGone> {
        self.session().visible = visible;
        if !visible {
            return Ok(());
        }
        self.heartbeat()?;
        self.evaluate_now().await;
        Ok(())
    }

    pub fn is_visible(&self) -> bool {
        self.session().visible
    }

    /// Liveness message plus a fresh copy of the config, so that a worker
    /// that lost its state resumes polling
    pub fn heartbeat(&self) -> Result<(), WorkerGone> {
        let config = self.session().config.clone();
        self.inner.worker.heartbeat()?;
        if let Some(config) = config {
            self.inner.worker.set_config(config)?;
        }
        Ok(())
    }

    async fn evaluate_now(&self) {
        let now = self.now();
        let window_minutes = self.inner.ctx.config.reminder_window_minutes;

        let (added, locale) = {
            let mut session = self.session();
            let fresh = evaluate(
                &session.appointments,
                &session.subject_names,
                window_minutes,
                now,
            );
            let mut added = Vec::new();
            self.inner.upcoming.send_if_modified(|upcoming| {
                let before = upcoming.clone();
                added = upcoming.refresh(fresh);
                *upcoming != before
            });
            let added = added
                .into_iter()
                .filter(|alert| session.shown.insert(alert.id.clone()))
                .collect::<Vec<_>>();
            let locale = session
                .config
                .as_ref()
                .map(|c| c.locale)
                .unwrap_or_default();
            (added, locale)
        };

        for alert in added {
            self.notify(&alert, locale).await;
        }
    }

    async fn notify(&self, alert: &UpcomingAlert, locale: Locale) {
        if !self.permission().await.is_granted() {
            return;
        }
        let notification = Notification::reminder(
            &alert.id,
            alert.subject_name.as_deref(),
            alert.minutes_left,
            locale,
            &self.inner.ctx.config.app_url,
        );
        debug!("Monitor shows reminder: {}", alert.id);

        if let Err(WorkerGone) = self.inner.worker.show_notification(notification.clone()) {
            if let Err(e) = self.inner.ctx.services.notifier.show(&notification).await {
                warn!("Could not show reminder: {}: {}", alert.id, e);
            }
        }
    }

    pub async fn permission(&self) -> Permission {
        self.inner.ctx.services.notifier.permission().await
    }

    pub async fn request_permission(&self) -> Permission {
        self.inner.ctx.services.notifier.request_permission().await
    }

    pub fn mark_all_read(&self) -> UpcomingAlerts {
        self.inner
            .upcoming
            .send_modify(|upcoming| upcoming.mark_all_read());
        self.upcoming()
    }

    pub fn dismiss(&self, alert_id: &AlertId) -> Option<UpcomingAlert> {
        let mut dismissed = None;
        self.inner.upcoming.send_if_modified(|upcoming| {
            dismissed = upcoming.dismiss(alert_id);
            dismissed.is_some()
        });
        dismissed
    }

    /// Shows a notification right away so the user can check that
    /// notifications reach them
    pub async fn send_test_notification(&self) -> Result<Notification, NotifyError> {
        let permission = self.permission().await;
        if !permission.is_granted() {
            return Err(NotifyError::NotPermitted(permission));
        }
        let locale = self
            .session()
            .config
            .as_ref()
            .map(|c| c.locale)
            .unwrap_or_default();
        let notification =
            Notification::test(locale, &self.inner.ctx.config.app_url, self.now());
        self.inner.ctx.services.notifier.show(&notification).await?;
        Ok(notification)
    }

    /// Stream of the reminder list. Starts with the current list and yields
    /// a new snapshot on every change.
    pub fn subscribe_upcoming(&self) -> WatchStream<UpcomingAlerts> {
        WatchStream::new(self.inner.upcoming.subscribe())
    }

    pub fn upcoming(&self) -> UpcomingAlerts {
        self.inner.upcoming.borrow().clone()
    }
}
