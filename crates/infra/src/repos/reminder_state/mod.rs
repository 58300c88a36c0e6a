use super::kv::IKVRepo;
use reminder_scheduler_domain::{
    AlertId, Locale, NotifiedSet, ReminderRecord, SchedulerConfig, ID,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};

const CONFIG_KEY: &str = "config";
const NOTIFIED_KEY: &str = "notified";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchedulerConfigRaw {
    endpoint: String,
    credentials: String,
    owner_id: String,
    locale: Locale,
    timezone: String,
}

impl SchedulerConfigRaw {
    fn from_domain(config: &SchedulerConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            credentials: config.credentials.clone(),
            owner_id: config.owner_id.to_string(),
            locale: config.locale,
            timezone: config.timezone.name().to_string(),
        }
    }

    fn into_domain(self) -> anyhow::Result<SchedulerConfig> {
        let owner_id = self.owner_id.parse::<ID>()?;
        let timezone = SchedulerConfig::parse_timezone(&self.timezone)?;
        let config = SchedulerConfig::new(
            self.endpoint,
            self.credentials,
            owner_id,
            self.locale,
            timezone,
        )?;
        Ok(config)
    }
}

/// Typed access to the two namespaces of the persisted reminder state:
/// the connection config and the map of alert ids that were already shown.
#[derive(Clone)]
pub struct ReminderStateRepo {
    kv: Arc<dyn IKVRepo>,
}

impl ReminderStateRepo {
    pub fn new(kv: Arc<dyn IKVRepo>) -> Self {
        Self { kv }
    }

    pub async fn load_config(&self) -> anyhow::Result<Option<SchedulerConfig>> {
        match self.kv.get(CONFIG_KEY).await? {
            Some(value) => {
                let raw: SchedulerConfigRaw = serde_json::from_str(&value)?;
                Ok(Some(raw.into_domain()?))
            }
            None => Ok(None),
        }
    }

    pub async fn save_config(&self, config: &SchedulerConfig) -> anyhow::Result<()> {
        let value = serde_json::to_string(&SchedulerConfigRaw::from_domain(config))?;
        self.kv.set(CONFIG_KEY, &value).await
    }

    pub async fn clear_config(&self) -> anyhow::Result<()> {
        self.kv.delete(CONFIG_KEY).await
    }

    pub async fn load_notified(&self) -> anyhow::Result<NotifiedSet> {
        match self.kv.get(NOTIFIED_KEY).await? {
            Some(value) => {
                let raw: BTreeMap<String, i64> = serde_json::from_str(&value)?;
                let records = raw
                    .into_iter()
                    .map(|(alert_id, fired_at)| {
                        Ok(ReminderRecord {
                            alert_id: alert_id
                                .parse::<AlertId>()
                                .map_err(anyhow::Error::msg)?,
                            fired_at,
                        })
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Ok(NotifiedSet::from_records(records))
            }
            None => Ok(NotifiedSet::new()),
        }
    }

    pub async fn save_notified(&self, notified: &NotifiedSet) -> anyhow::Result<()> {
        let raw = notified
            .records()
            .into_iter()
            .map(|r| (r.alert_id.to_string(), r.fired_at))
            .collect::<BTreeMap<_, _>>();
        self.kv.set(NOTIFIED_KEY, &serde_json::to_string(&raw)?).await
    }

    pub async fn clear_notified(&self) -> anyhow::Result<()> {
        self.kv.delete(NOTIFIED_KEY).await
    }
}
