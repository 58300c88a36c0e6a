mod appointment;
mod config;
mod notification;
mod reminder;
mod shared;
mod timespan;
pub mod upcoming;

pub use appointment::{Appointment, AppointmentStatus};
pub use chrono_tz::Tz;
pub use config::{InvalidConfigError, Locale, SchedulerConfig};
pub use notification::{
    Notification, NotificationAction, Permission, DISMISS_ACTION, OPEN_ACTION,
};
pub use reminder::{
    minutes_left, plan_reminder, AlertId, NotifiedSet, ReminderDecision, ReminderRecord,
    ReminderTiming, NOTIFIED_RETENTION_MILLIS,
};
pub use shared::entity::{InvalidIDError, ID};
pub use timespan::{InvalidTimeSpanError, TimeSpan};
pub use upcoming::{UpcomingAlert, UpcomingAlerts};
