use super::{FetchError, IAppointmentSource};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use reminder_scheduler_domain::{
    Appointment, AppointmentStatus, SchedulerConfig, TimeSpan, Tz, ID,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::{collections::HashMap, time::Duration};
use tracing::{debug, error, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SessionRow {
    id: ID,
    date: String,
    #[serde(default)]
    client_id: Option<ID>,
    status: String,
}

impl SessionRow {
    fn into_domain(self, tz: &Tz) -> Result<Appointment, FetchError> {
        let status = self
            .status
            .parse::<AppointmentStatus>()
            .map_err(FetchError::Malformed)?;
        Ok(Appointment {
            scheduled_ts: parse_timestamp(&self.date, tz)?,
            id: self.id,
            subject_id: self.client_id,
            status,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ClientRow {
    id: ID,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

impl ClientRow {
    fn display_name(&self) -> Option<String> {
        let name = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Timestamps without an offset are local times of the practitioner
fn parse_timestamp(value: &str, tz: &Tz) -> Result<i64, FetchError> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.timestamp_millis());
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|_| FetchError::Malformed(format!("Invalid date: {}", value)))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|datetime| datetime.timestamp_millis())
        .ok_or_else(|| FetchError::Malformed(format!("Nonexistent local date: {}", value)))
}

fn format_timestamp(timestamp_millis: i64) -> Result<String, FetchError> {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|datetime| datetime.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| FetchError::Malformed(format!("Invalid timestamp: {}", timestamp_millis)))
}

/// Reads appointments from a PostgREST api (e.g. Supabase) exposing the
/// `sessions` and `clients` tables.
pub struct RestAppointmentSource {
    client: Client,
}

impl RestAppointmentSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn get(&self, config: &SchedulerConfig, table: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/rest/v1/{}", config.endpoint, table))
            .timeout(REQUEST_TIMEOUT)
            .header("apikey", &config.credentials)
            .header("authorization", format!("Bearer {}", config.credentials))
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, FetchError> {
        let res = request.send().await.map_err(|e| {
            error!(
                "[Network Error] Appointment source GET error. Error message: {:?}",
                e
            );
            FetchError::Network(e.to_string())
        })?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Auth(status.as_u16()));
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        res.json::<T>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Appointment source GET error. Error message: {:?}",
                e
            );
            FetchError::Malformed(e.to_string())
        })
    }
}

impl Default for RestAppointmentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IAppointmentSource for RestAppointmentSource {
    async fn fetch_upcoming_appointments(
        &self,
        config: &SchedulerConfig,
        span: &TimeSpan,
    ) -> Result<Vec<Appointment>, FetchError> {
        let query = [
            ("user_id", format!("eq.{}", config.owner_id)),
            ("status", format!("eq.{}", AppointmentStatus::Scheduled)),
            ("date", format!("gte.{}", format_timestamp(span.get_start())?)),
            ("date", format!("lt.{}", format_timestamp(span.get_end())?)),
            ("select", "id,date,client_id,status".to_string()),
            ("order", "date.asc".to_string()),
        ];
        let rows: Vec<SessionRow> = self
            .send(self.get(config, "sessions").query(&query))
            .await?;
        debug!("Fetched {} appointments", rows.len());

        // Unreadable rows are skipped, the rest still get reminders
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                match row.into_domain(&config.timezone) {
                    Ok(appointment) => Some(appointment),
                    Err(e) => {
                        warn!("Skipping appointment: {}: {}", id, e);
                        None
                    }
                }
            })
            .collect())
    }

    async fn fetch_subject_names(
        &self,
        config: &SchedulerConfig,
        subject_ids: &[ID],
    ) -> Result<HashMap<ID, String>, FetchError> {
        if subject_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids = subject_ids
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let query = [
            ("id", format!("in.({})", ids)),
            ("select", "id,first_name,last_name".to_string()),
        ];
        let rows: Vec<ClientRow> = self
            .send(self.get(config, "clients").query(&query))
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.display_name().map(|name| (row.id, name)))
            .collect())
    }
}
