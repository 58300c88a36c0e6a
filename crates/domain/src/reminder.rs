use crate::{appointment::Appointment, shared::entity::ID};
use std::{collections::HashMap, fmt::Display, str::FromStr};

/// How long a `ReminderRecord` is kept around. An appointment whose reminder
/// fired more than a day ago can never re-enter the upcoming window.
pub const NOTIFIED_RETENTION_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// Deterministic dedup key of one (appointment, reminder window) pair.
///
/// It is also used as the notification tag so that the platform collapses
/// notifications shown for the same reminder by different contexts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(String);

impl AlertId {
    pub fn new(appointment_id: &ID, window_minutes: i64) -> Self {
        Self(format!("{}_{}", appointment_id, window_minutes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlertId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("Alert id must not be empty".into());
        }
        Ok(Self(s.to_string()))
    }
}

/// Proof that the reminder for `alert_id` has been shown
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecord {
    pub alert_id: AlertId,
    pub fired_at: i64,
}

/// The set of reminders that have already been shown, keyed by `AlertId`.
///
/// Records are immutable: recording an already known `AlertId` keeps the
/// original `fired_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotifiedSet {
    records: HashMap<AlertId, i64>,
}

impl NotifiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I: IntoIterator<Item = ReminderRecord>>(records: I) -> Self {
        let mut set = Self::new();
        for record in records {
            set.record(record);
        }
        set
    }

    pub fn contains(&self, alert_id: &AlertId) -> bool {
        self.records.contains_key(alert_id)
    }

    pub fn fired_at(&self, alert_id: &AlertId) -> Option<i64> {
        self.records.get(alert_id).copied()
    }

    /// Returns false if the `AlertId` was already recorded
    pub fn record(&mut self, record: ReminderRecord) -> bool {
        if self.records.contains_key(&record.alert_id) {
            return false;
        }
        self.records.insert(record.alert_id, record.fired_at);
        true
    }

    /// Union of both sets. Keeps the earliest `fired_at` of duplicates.
    pub fn merge(&mut self, other: NotifiedSet) {
        for (alert_id, fired_at) in other.records {
            let entry = self.records.entry(alert_id).or_insert(fired_at);
            if fired_at < *entry {
                *entry = fired_at;
            }
        }
    }

    /// Removes records that are older than the retention window and returns
    /// how many were removed
    pub fn prune(&mut self, now_ts: i64) -> usize {
        let cutoff = now_ts - NOTIFIED_RETENTION_MILLIS;
        let before = self.records.len();
        self.records.retain(|_, fired_at| *fired_at >= cutoff);
        before - self.records.len()
    }

    pub fn records(&self) -> Vec<ReminderRecord> {
        let mut records = self
            .records
            .iter()
            .map(|(alert_id, fired_at)| ReminderRecord {
                alert_id: alert_id.clone(),
                fired_at: *fired_at,
            })
            .collect::<Vec<_>>();
        records.sort_by(|r1, r2| r1.alert_id.cmp(&r2.alert_id));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Timing parameters of the reminder worker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReminderTiming {
    /// Minutes before an appointment at which the reminder should fire
    pub window_minutes: i64,
    /// Millis between two poll cycles
    pub poll_interval_millis: i64,
}

impl ReminderTiming {
    /// Reminders due within this horizon get a precise timer instead of
    /// waiting for a later poll cycle
    pub fn arm_horizon_millis(&self) -> i64 {
        2 * self.poll_interval_millis
    }
}

/// What the worker should do with an appointment in the current poll cycle
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderDecision {
    /// The appointment is not `Scheduled`
    NotEligible,
    AlreadyNotified,
    /// The appointment has already started, a first time reminder would be stale
    Expired,
    FireNow,
    /// Fire after `delay_millis`
    Arm { delay_millis: i64 },
    /// Too far in the future, a later poll cycle will pick it up
    Later,
}

pub fn plan_reminder(
    appointment: &Appointment,
    alert_id: &AlertId,
    timing: &ReminderTiming,
    notified: &NotifiedSet,
    now_ts: i64,
) -> ReminderDecision {
    if !appointment.is_reminder_eligible() {
        return ReminderDecision::NotEligible;
    }
    if notified.contains(alert_id) {
        return ReminderDecision::AlreadyNotified;
    }
    if appointment.has_started(now_ts) {
        return ReminderDecision::Expired;
    }

    let delta = appointment.remind_at(timing.window_minutes) - now_ts;
    if delta <= 0 {
        ReminderDecision::FireNow
    } else if delta <= timing.arm_horizon_millis() {
        ReminderDecision::Arm {
            delay_millis: delta,
        }
    } else {
        ReminderDecision::Later
    }
}

/// Whole minutes left until `scheduled_ts`, rounded up
pub fn minutes_left(scheduled_ts: i64, now_ts: i64) -> i64 {
    let millis = (scheduled_ts - now_ts).max(0);
    (millis + 60 * 1000 - 1) / (60 * 1000)
}
