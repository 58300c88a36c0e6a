mod base;
mod config;
mod monitor;
mod notification;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use config::ConfigClient;
pub use config::SetConfigInput;
use monitor::MonitorClient;
pub use monitor::SetAppointmentsInput;
use notification::NotificationClient;
use reminder::ReminderClient;
pub use reminder_scheduler_api_structs::dtos::*;
pub use reminder_scheduler_domain::{
    Appointment, AppointmentStatus, Locale, Notification, Permission, Tz, ID,
};
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use reminder_scheduler_api_structs::dtos::UpcomingReminderDTO as UpcomingReminder;
pub use reminder_scheduler_api_structs::dtos::UpcomingRemindersDTO as UpcomingReminders;
pub use reminder_scheduler_api_structs::dtos::WorkerStatusDTO as WorkerStatus;

/// Reminder Scheduler SDK
///
/// Methods for a host page talking to a running reminder scheduler.
#[derive(Clone)]
pub struct ReminderSDK {
    pub config: ConfigClient,
    pub monitor: MonitorClient,
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl ReminderSDK {
    /// `address` is the api root, e.g. `http://localhost:5000/api/v1`
    pub fn new<T: Into<String>>(address: T) -> Self {
        let base = Arc::new(BaseClient::new(address.into()));

        Self {
            config: ConfigClient::new(base.clone()),
            monitor: MonitorClient::new(base.clone()),
            notification: NotificationClient::new(base.clone()),
            reminder: ReminderClient::new(base.clone()),
            status: StatusClient::new(base),
        }
    }
}
