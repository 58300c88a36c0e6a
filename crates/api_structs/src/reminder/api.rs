use crate::dtos::{UpcomingReminderDTO, UpcomingRemindersDTO};
use reminder_scheduler_domain::{UpcomingAlert, UpcomingAlerts};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRemindersResponse {
    pub upcoming: UpcomingRemindersDTO,
}

impl UpcomingRemindersResponse {
    pub fn new(upcoming: &UpcomingAlerts) -> Self {
        Self {
            upcoming: UpcomingRemindersDTO::new(upcoming),
        }
    }
}

pub mod get_upcoming_reminders {
    use super::*;

    pub type APIResponse = UpcomingRemindersResponse;
}

pub mod mark_all_reminders_read {
    use super::*;

    pub type APIResponse = UpcomingRemindersResponse;
}

pub mod dismiss_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub alert_id: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: UpcomingReminderDTO,
    }

    impl APIResponse {
        pub fn new(alert: UpcomingAlert) -> Self {
            Self {
                reminder: UpcomingReminderDTO::new(alert),
            }
        }
    }
}
