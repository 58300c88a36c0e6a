use crate::dtos::SchedulerConfigDTO;
use reminder_scheduler_domain::{Locale, SchedulerConfig, ID};
use serde::{Deserialize, Serialize};

pub mod set_config {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub endpoint: String,
        pub credentials: String,
        pub owner_id: ID,
        #[serde(default)]
        pub locale: Option<Locale>,
        /// IANA timezone, defaults to UTC
        #[serde(default)]
        pub timezone: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub config: SchedulerConfigDTO,
    }

    impl APIResponse {
        pub fn new(config: SchedulerConfig) -> Self {
            Self {
                config: SchedulerConfigDTO::new(config),
            }
        }
    }
}

pub mod clear_config {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
    }
}
