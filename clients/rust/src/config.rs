use crate::{APIResponse, BaseClient};
use reminder_scheduler_api_structs::*;
use reminder_scheduler_domain::{Locale, Tz, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ConfigClient {
    base: Arc<BaseClient>,
}

pub struct SetConfigInput {
    pub endpoint: String,
    pub credentials: String,
    pub owner_id: ID,
    pub locale: Option<Locale>,
    pub timezone: Option<Tz>,
}

impl ConfigClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Login
    pub async fn set(&self, input: SetConfigInput) -> APIResponse<set_config::APIResponse> {
        let body = set_config::RequestBody {
            endpoint: input.endpoint,
            credentials: input.credentials,
            owner_id: input.owner_id,
            locale: input.locale,
            timezone: input.timezone.map(|tz| tz.name().to_string()),
        };
        self.base.put(body, "config".into(), StatusCode::OK).await
    }

    /// Logout
    pub async fn clear(&self) -> APIResponse<clear_config::APIResponse> {
        self.base.delete("config".into(), StatusCode::OK).await
    }
}
