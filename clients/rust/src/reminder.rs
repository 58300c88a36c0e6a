use crate::{APIResponse, BaseClient};
use reminder_scheduler_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn upcoming(&self) -> APIResponse<get_upcoming_reminders::APIResponse> {
        self.base.get("reminders".into(), StatusCode::OK).await
    }

    pub async fn mark_all_read(&self) -> APIResponse<mark_all_reminders_read::APIResponse> {
        self.base
            .post((), "reminders/read".into(), StatusCode::OK)
            .await
    }

    pub async fn dismiss(&self, alert_id: &str) -> APIResponse<dismiss_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", alert_id), StatusCode::OK)
            .await
    }
}
