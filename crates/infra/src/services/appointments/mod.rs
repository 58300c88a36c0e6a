mod inmemory;
mod rest;

pub use inmemory::InMemoryAppointmentSource;
pub use rest::RestAppointmentSource;

use reminder_scheduler_domain::{Appointment, SchedulerConfig, TimeSpan, ID};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Appointment source rejected the credentials with status: {0}")]
    Auth(u16),
    #[error("Appointment source responded with unexpected status: {0}")]
    Status(u16),
    #[error("Appointment source returned a malformed response: {0}")]
    Malformed(String),
}

/// The external system that owns appointments and the people they are with
#[async_trait::async_trait]
pub trait IAppointmentSource: Send + Sync {
    /// All `Scheduled` appointments of `config.owner_id` starting inside `span`,
    /// ordered by start
    async fn fetch_upcoming_appointments(
        &self,
        config: &SchedulerConfig,
        span: &TimeSpan,
    ) -> Result<Vec<Appointment>, FetchError>;

    /// Display names of the given subjects. Unknown ids are left out.
    async fn fetch_subject_names(
        &self,
        config: &SchedulerConfig,
        subject_ids: &[ID],
    ) -> Result<HashMap<ID, String>, FetchError>;
}
