mod message;
#[cfg(test)]
mod tests;

pub use message::{WorkerMessage, WorkerState, WorkerStatus};

use reminder_scheduler_domain::{
    minutes_left, plan_reminder, AlertId, Appointment, Notification, NotifiedSet,
    ReminderDecision, ReminderRecord, ReminderTiming, SchedulerConfig, TimeSpan, ID,
};
use reminder_scheduler_infra::{FetchError, IAppointmentSource, NotifyError, ReminderContext};
use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};
use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

/// Upper bound for a single notifier call, the event loop waits on it
const SHOW_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug, Clone, PartialEq)]
#[error("The reminder worker is not running")]
pub struct WorkerGone;

/// Sending side of the best effort channel to the worker. The worker stops
/// once every handle is dropped.
#[derive(Clone)]
pub struct WorkerHandle {
    sender: mpsc::UnboundedSender<WorkerEvent>,
}

impl WorkerHandle {
    pub fn send(&self, message: WorkerMessage) -> Result<(), WorkerGone> {
        self.sender
            .send(WorkerEvent::Message(message))
            .map_err(|_| WorkerGone)
    }

    pub fn set_config(&self, config: SchedulerConfig) -> Result<(), WorkerGone> {
        self.send(WorkerMessage::SetConfig(config))
    }

    pub fn clear_config(&self) -> Result<(), WorkerGone> {
        self.send(WorkerMessage::ClearConfig)
    }

    pub fn heartbeat(&self) -> Result<(), WorkerGone> {
        self.send(WorkerMessage::Heartbeat)
    }

    pub fn show_notification(&self, notification: Notification) -> Result<(), WorkerGone> {
        self.send(WorkerMessage::ShowNotification(notification))
    }

    pub async fn status(&self) -> Result<WorkerStatus, WorkerGone> {
        let (reply, receiver) = oneshot::channel();
        self.send(WorkerMessage::Status(reply))?;
        receiver.await.map_err(|_| WorkerGone)
    }
}

enum WorkerEvent {
    Message(WorkerMessage),
    PollDue {
        generation: u64,
    },
    Fetched {
        generation: u64,
        result: Result<FetchedAppointments, FetchError>,
    },
    TimerFired {
        generation: u64,
        alert_id: AlertId,
    },
}

struct FetchedAppointments {
    appointments: Vec<Appointment>,
    subject_names: HashMap<ID, String>,
}

struct PendingTimer {
    appointment: Appointment,
    subject_name: Option<String>,
    remind_ts: i64,
    handle: JoinHandle<()>,
}

/// The background half of the scheduler.
///
/// Polls the appointment source, fires reminders that are due and arms
/// precise timers for the ones that are about to become due. Every event is
/// handled on a single task so the worker state is never shared.
///
/// Events carry the `generation` they were created in. Clearing or
/// replacing the config bumps the generation, which makes in flight
/// fetches, poll ticks and timers of the old config no-ops.
pub struct Worker {
    ctx: ReminderContext,
    timing: ReminderTiming,
    state: WorkerState,
    config: Option<SchedulerConfig>,
    notified: NotifiedSet,
    timers: HashMap<AlertId, PendingTimer>,
    generation: u64,
    cycles_completed: u64,
    last_heartbeat_ts: Option<i64>,
    sender: mpsc::WeakUnboundedSender<WorkerEvent>,
}

impl Worker {
    /// Starts the worker on the current tokio runtime
    pub fn spawn(ctx: ReminderContext) -> WorkerHandle {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = Self {
            timing: ctx.config.reminder_timing(),
            ctx,
            state: WorkerState::Uninitialized,
            config: None,
            notified: NotifiedSet::new(),
            timers: HashMap::new(),
            generation: 0,
            cycles_completed: 0,
            last_heartbeat_ts: None,
            sender: sender.downgrade(),
        };
        tokio::spawn(worker.run(receiver));

        WorkerHandle { sender }
    }

    async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<WorkerEvent>) {
        self.activate().await;
        while let Some(event) = receiver.recv().await {
            self.handle_event(event).await;
        }
        self.cancel_timers();
        debug!("Reminder worker stopped");
    }

    async fn activate(&mut self) {
        match self.ctx.repos.reminder_state_repo.load_config().await {
            Ok(Some(config)) => {
                info!(
                    "Reminder worker resumes polling for owner: {}",
                    config.owner_id
                );
                self.config = Some(config);
                self.start_polling();
            }
            Ok(None) => self.state = WorkerState::Idle,
            Err(e) => {
                warn!("Could not load persisted config: {:?}", e);
                self.state = WorkerState::Idle;
            }
        }
    }

    fn now(&self) -> i64 {
        self.ctx.sys.get_timestamp_millis()
    }

    async fn handle_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Message(message) => self.handle_message(message).await,
            WorkerEvent::PollDue { generation } if generation == self.generation => {
                self.start_cycle()
            }
            WorkerEvent::Fetched { generation, result } if generation == self.generation => {
                self.finish_cycle(result).await;
                self.schedule_poll(self.timing.poll_interval_millis);
            }
            WorkerEvent::TimerFired {
                generation,
                alert_id,
            } if generation == self.generation => self.on_timer_fired(alert_id).await,
            _ => debug!("Discarding event of a previous config"),
        }
    }

    async fn handle_message(&mut self, message: WorkerMessage) {
        match message {
            WorkerMessage::SetConfig(config) => self.set_config(config).await,
            WorkerMessage::ClearConfig => self.clear_config().await,
            WorkerMessage::Heartbeat => {
                self.last_heartbeat_ts = Some(self.now());
                if self.config.is_some() && self.state != WorkerState::Polling {
                    self.start_polling();
                }
            }
            WorkerMessage::ShowNotification(notification) => {
                if let Err(e) = self.show(&notification).await {
                    warn!(
                        "Could not show notification: {} on behalf of the monitor: {}",
                        notification.tag, e
                    );
                }
            }
            WorkerMessage::Status(reply) => {
                let _ = reply.send(self.status());
            }
        }
    }

    fn status(&self) -> WorkerStatus {
        WorkerStatus {
            state: self.state,
            owner_id: self.config.as_ref().map(|c| c.owner_id.clone()),
            pending_timers: self.timers.len(),
            notified_count: self.notified.len(),
            cycles_completed: self.cycles_completed,
            last_heartbeat_ts: self.last_heartbeat_ts,
        }
    }

    async fn set_config(&mut self, config: SchedulerConfig) {
        if let Err(e) = self.ctx.repos.reminder_state_repo.save_config(&config).await {
            warn!("Could not persist config: {:?}", e);
        }

        let same_source = self
            .config
            .as_ref()
            .map(|current| current.same_source(&config))
            .unwrap_or(false);
        let owner_id = config.owner_id.clone();
        self.config = Some(config);

        if same_source && self.state == WorkerState::Polling {
            return;
        }
        if !same_source {
            self.reset_schedule();
        }
        info!("Reminder worker starts polling for owner: {}", owner_id);
        self.start_polling();
    }

    async fn clear_config(&mut self) {
        self.reset_schedule();
        self.config = None;
        self.notified.clear();

        let repo = &self.ctx.repos.reminder_state_repo;
        if let Err(e) = repo.clear_config().await {
            warn!("Could not clear persisted config: {:?}", e);
        }
        if let Err(e) = repo.clear_notified().await {
            warn!("Could not clear persisted notified reminders: {:?}", e);
        }
        self.state = WorkerState::Stopped;
        info!("Reminder worker stopped polling");
    }

    fn reset_schedule(&mut self) {
        self.generation += 1;
        self.cancel_timers();
    }

    fn cancel_timers(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.handle.abort();
        }
    }

    fn start_polling(&mut self) {
        self.state = WorkerState::Polling;
        self.schedule_poll(0);
    }

    fn schedule_poll(&self, delay_millis: i64) {
        self.schedule_event(
            delay_millis,
            WorkerEvent::PollDue {
                generation: self.generation,
            },
        );
    }

    fn schedule_event(&self, delay_millis: i64, event: WorkerEvent) -> JoinHandle<()> {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if delay_millis > 0 {
                tokio::time::sleep(Duration::from_millis(delay_millis as u64)).await;
            }
            if let Some(sender) = sender.upgrade() {
                let _ = sender.send(event);
            }
        })
    }

    /// The fetch runs on its own task so that messages are still handled
    /// while waiting on the network
    fn start_cycle(&self) {
        let config = match &self.config {
            Some(config) => config.clone(),
            None => return,
        };
        let source = self.ctx.services.appointment_source.clone();
        let now = self.now();
        let lookahead_days = self.ctx.config.lookahead_days;
        let generation = self.generation;
        let sender = self.sender.clone();
        // The next cycle is only armed once this one reports back
        let fetch_timeout = Duration::from_millis(self.timing.poll_interval_millis as u64);

        tokio::spawn(async move {
            let fetch = fetch_appointments(source.as_ref(), &config, now, lookahead_days);
            let result = match tokio::time::timeout(fetch_timeout, fetch).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Network(format!(
                    "No answer within {} ms",
                    fetch_timeout.as_millis()
                ))),
            };
            if let Some(sender) = sender.upgrade() {
                let _ = sender.send(WorkerEvent::Fetched { generation, result });
            }
        });
    }

    async fn finish_cycle(&mut self, result: Result<FetchedAppointments, FetchError>) {
        let fetched = match result {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Skipping reminder cycle: {}", e);
                return;
            }
        };

        self.load_notified().await;
        let now = self.now();
        let pruned = self.notified.prune(now);
        if pruned > 0 {
            debug!("Pruned {} expired reminder records", pruned);
        }

        let mut armed = HashSet::new();
        for appointment in fetched.appointments {
            let alert_id = AlertId::new(&appointment.id, self.timing.window_minutes);
            let subject_name = appointment
                .subject_id
                .as_ref()
                .and_then(|subject_id| fetched.subject_names.get(subject_id))
                .cloned();

            match plan_reminder(&appointment, &alert_id, &self.timing, &self.notified, now) {
                ReminderDecision::FireNow => {
                    self.fire(&appointment, subject_name.as_deref(), alert_id)
                        .await;
                }
                ReminderDecision::Arm { delay_millis } => {
                    armed.insert(alert_id.clone());
                    self.arm_timer(alert_id, appointment, subject_name, delay_millis);
                }
                ReminderDecision::NotEligible
                | ReminderDecision::AlreadyNotified
                | ReminderDecision::Expired
                | ReminderDecision::Later => {}
            }
        }

        // Timers of appointments that were cancelled, moved or fired
        self.timers.retain(|alert_id, timer| {
            let keep = armed.contains(alert_id);
            if !keep {
                timer.handle.abort();
            }
            keep
        });

        self.persist_notified().await;
        self.cycles_completed += 1;
    }

    fn arm_timer(
        &mut self,
        alert_id: AlertId,
        appointment: Appointment,
        subject_name: Option<String>,
        delay_millis: i64,
    ) {
        let remind_ts = appointment.remind_at(self.timing.window_minutes);
        if let Some(timer) = self.timers.get_mut(&alert_id) {
            if timer.remind_ts == remind_ts {
                timer.appointment = appointment;
                timer.subject_name = subject_name;
                return;
            }
            timer.handle.abort();
        }

        debug!("Arming reminder: {} in {} ms", alert_id, delay_millis);
        let handle = self.schedule_event(
            delay_millis,
            WorkerEvent::TimerFired {
                generation: self.generation,
                alert_id: alert_id.clone(),
            },
        );
        self.timers.insert(
            alert_id,
            PendingTimer {
                appointment,
                subject_name,
                remind_ts,
                handle,
            },
        );
    }

    async fn on_timer_fired(&mut self, alert_id: AlertId) {
        let timer = match self.timers.remove(&alert_id) {
            Some(timer) => timer,
            None => return,
        };

        self.load_notified().await;
        if self.notified.contains(&alert_id) {
            return;
        }
        if timer.appointment.has_started(self.now()) {
            debug!("Appointment of reminder: {} already started", alert_id);
            return;
        }
        if self
            .fire(&timer.appointment, timer.subject_name.as_deref(), alert_id)
            .await
        {
            self.persist_notified().await;
        }
    }

    /// Shows the reminder and records it. Returns false if it could not be
    /// shown, in which case a later cycle tries again.
    async fn fire(
        &mut self,
        appointment: &Appointment,
        subject_name: Option<&str>,
        alert_id: AlertId,
    ) -> bool {
        let locale = match &self.config {
            Some(config) => config.locale,
            None => return false,
        };
        let now = self.now();
        let notification = Notification::reminder(
            &alert_id,
            subject_name,
            minutes_left(appointment.scheduled_ts, now),
            locale,
            &self.ctx.config.app_url,
        );

        match self.show(&notification).await {
            Ok(_) => {
                info!("Reminder: {} was shown", alert_id);
                self.notified.record(ReminderRecord {
                    alert_id,
                    fired_at: now,
                });
                true
            }
            Err(NotifyError::NotPermitted(permission)) => {
                debug!(
                    "Reminder: {} not shown, notification permission is: {}",
                    alert_id,
                    permission.as_str()
                );
                false
            }
            Err(e) => {
                warn!("Reminder: {} could not be shown: {}", alert_id, e);
                false
            }
        }
    }

    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        tokio::time::timeout(SHOW_TIMEOUT, self.ctx.services.notifier.show(notification))
            .await
            .unwrap_or_else(|_| {
                Err(NotifyError::Delivery(format!(
                    "Notifier did not answer within {} s",
                    SHOW_TIMEOUT.as_secs()
                )))
            })
    }

    async fn load_notified(&mut self) {
        match self.ctx.repos.reminder_state_repo.load_notified().await {
            Ok(persisted) => self.notified.merge(persisted),
            Err(e) => warn!(
                "Could not load notified reminders, using the in-memory set: {:?}",
                e
            ),
        }
    }

    async fn persist_notified(&self) {
        if let Err(e) = self
            .ctx
            .repos
            .reminder_state_repo
            .save_notified(&self.notified)
            .await
        {
            warn!("Could not persist notified reminders: {:?}", e);
        }
    }
}

async fn fetch_appointments(
    source: &dyn IAppointmentSource,
    config: &SchedulerConfig,
    now: i64,
    lookahead_days: i64,
) -> Result<FetchedAppointments, FetchError> {
    let span = TimeSpan::lookahead(now, &config.timezone, lookahead_days)
        .map_err(|e| FetchError::Malformed(e.to_string()))?;
    let appointments = source.fetch_upcoming_appointments(config, &span).await?;

    let mut subject_ids = appointments
        .iter()
        .filter_map(|a| a.subject_id.clone())
        .collect::<Vec<_>>();
    subject_ids.sort();
    subject_ids.dedup();

    // Names only decorate the notification, a reminder is still shown without them
    let subject_names = match source.fetch_subject_names(config, &subject_ids).await {
        Ok(names) => names,
        Err(e) => {
            warn!("Could not fetch subject names: {}", e);
            HashMap::new()
        }
    };

    Ok(FetchedAppointments {
        appointments,
        subject_names,
    })
}
