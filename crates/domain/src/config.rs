use crate::shared::entity::ID;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Display language of notification texts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Tr,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Self::Tr
    }
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = InvalidConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tr" => Ok(Self::Tr),
            "en" => Ok(Self::En),
            _ => Err(InvalidConfigError::Locale(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidConfigError {
    #[error("Endpoint: `{0}` must be an absolute http(s) url")]
    Endpoint(String),
    #[error("Credentials must not be empty")]
    EmptyCredentials,
    #[error("Locale: `{0}` is not supported")]
    Locale(String),
    #[error("Timezone: `{0}` is not a valid IANA timezone")]
    Timezone(String),
}

/// Connection settings the reminder worker needs to fetch appointments on
/// behalf of the logged in practitioner.
#[derive(Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Base url of the appointment store, e.g. `https://xyz.supabase.co`
    pub endpoint: String,
    /// Api key sent with every request to `endpoint`
    pub credentials: String,
    /// Whose appointments to fetch
    pub owner_id: ID,
    pub locale: Locale,
    /// Used to decide where "today" starts when bounding the fetch window
    pub timezone: Tz,
}

impl SchedulerConfig {
    pub fn new(
        endpoint: String,
        credentials: String,
        owner_id: ID,
        locale: Locale,
        timezone: Tz,
    ) -> Result<Self, InvalidConfigError> {
        let parsed_endpoint = url::Url::parse(&endpoint)
            .map_err(|_| InvalidConfigError::Endpoint(endpoint.clone()))?;
        if !["https", "http"].contains(&parsed_endpoint.scheme()) {
            return Err(InvalidConfigError::Endpoint(endpoint));
        }
        if credentials.trim().is_empty() {
            return Err(InvalidConfigError::EmptyCredentials);
        }

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            credentials,
            owner_id,
            locale,
            timezone,
        })
    }

    pub fn parse_timezone(timezone: &str) -> Result<Tz, InvalidConfigError> {
        timezone
            .parse::<Tz>()
            .map_err(|_| InvalidConfigError::Timezone(timezone.to_string()))
    }

    /// Two configs with the same source fetch the very same appointments,
    /// they may only differ in presentation settings.
    pub fn same_source(&self, other: &SchedulerConfig) -> bool {
        self.endpoint == other.endpoint
            && self.credentials == other.credentials
            && self.owner_id == other.owner_id
    }
}

impl std::fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("endpoint", &self.endpoint)
            .field("credentials", &"<redacted>")
            .field("owner_id", &self.owner_id)
            .field("locale", &self.locale)
            .field("timezone", &self.timezone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> Result<SchedulerConfig, InvalidConfigError> {
        SchedulerConfig::new(
            endpoint.into(),
            "anon-key".into(),
            ID::new(),
            Locale::Tr,
            Tz::UTC,
        )
    }

    #[test]
    fn it_rejects_invalid_endpoints() {
        for endpoint in &["", "test.com", "ftp://test.com", "supabase"] {
            assert_eq!(
                config(endpoint).unwrap_err(),
                InvalidConfigError::Endpoint(endpoint.to_string())
            );
        }
    }

    #[test]
    fn it_accepts_valid_endpoints() {
        let cfg = config("https://abc.supabase.co/").unwrap();
        assert_eq!(cfg.endpoint, "https://abc.supabase.co");
        assert!(config("http://localhost:54321").is_ok());
    }

    #[test]
    fn it_rejects_empty_credentials() {
        let res = SchedulerConfig::new(
            "https://abc.supabase.co".into(),
            "  ".into(),
            ID::new(),
            Locale::En,
            Tz::UTC,
        );
        assert_eq!(res.unwrap_err(), InvalidConfigError::EmptyCredentials);
    }

    #[test]
    fn debug_output_hides_credentials() {
        let cfg = config("https://abc.supabase.co").unwrap();
        assert!(!format!("{:?}", cfg).contains("anon-key"));
    }

    #[test]
    fn same_source_ignores_presentation_settings() {
        let cfg = config("https://abc.supabase.co").unwrap();
        let mut other = cfg.clone();
        other.locale = Locale::En;
        other.timezone = chrono_tz::Europe::Istanbul;
        assert!(cfg.same_source(&other));
        other.owner_id = ID::new();
        assert!(!cfg.same_source(&other));
    }

    #[test]
    fn it_parses_locales_and_timezones() {
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert!("de".parse::<Locale>().is_err());
        assert_eq!(
            SchedulerConfig::parse_timezone("Europe/Istanbul"),
            Ok(chrono_tz::Europe::Istanbul)
        );
        assert!(SchedulerConfig::parse_timezone("Mars/Olympus").is_err());
    }
}
