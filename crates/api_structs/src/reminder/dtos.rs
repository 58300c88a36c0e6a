use reminder_scheduler_domain::{UpcomingAlert, UpcomingAlerts, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingReminderDTO {
    pub id: String,
    pub appointment_id: ID,
    pub subject_name: Option<String>,
    pub minutes_left: i64,
    pub scheduled_ts: i64,
    pub read: bool,
}

impl UpcomingReminderDTO {
    pub fn new(alert: UpcomingAlert) -> Self {
        Self {
            id: alert.id.to_string(),
            appointment_id: alert.appointment_id,
            subject_name: alert.subject_name,
            minutes_left: alert.minutes_left,
            scheduled_ts: alert.scheduled_ts,
            read: alert.read,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRemindersDTO {
    pub reminders: Vec<UpcomingReminderDTO>,
    pub unread_count: usize,
}

impl UpcomingRemindersDTO {
    pub fn new(upcoming: &UpcomingAlerts) -> Self {
        Self {
            reminders: upcoming
                .alerts()
                .iter()
                .cloned()
                .map(UpcomingReminderDTO::new)
                .collect(),
            unread_count: upcoming.unread_count(),
        }
    }
}
