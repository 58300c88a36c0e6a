use reminder_scheduler_domain::{Locale, SchedulerConfig, ID};
use serde::{Deserialize, Serialize};

/// The active config without its credentials
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfigDTO {
    pub endpoint: String,
    pub owner_id: ID,
    pub locale: Locale,
    pub timezone: String,
}

impl SchedulerConfigDTO {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            endpoint: config.endpoint,
            owner_id: config.owner_id,
            locale: config.locale,
            timezone: config.timezone.name().to_string(),
        }
    }
}
