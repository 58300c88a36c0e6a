use crate::{APIResponse, BaseClient};
use reminder_scheduler_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn permission(&self) -> APIResponse<get_permission::APIResponse> {
        self.base
            .get("notifications/permission".into(), StatusCode::OK)
            .await
    }

    pub async fn request_permission(&self) -> APIResponse<request_permission::APIResponse> {
        self.base
            .post((), "notifications/permission".into(), StatusCode::OK)
            .await
    }

    pub async fn send_test(&self) -> APIResponse<send_test_notification::APIResponse> {
        self.base
            .post((), "notifications/test".into(), StatusCode::OK)
            .await
    }
}
