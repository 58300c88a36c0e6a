use super::{FetchError, IAppointmentSource};
use reminder_scheduler_domain::{Appointment, SchedulerConfig, TimeSpan, ID};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

/// Appointment source used by tests and in-process hosts. Can be told to
/// fail in order to simulate an unreachable backend.
#[derive(Default)]
pub struct InMemoryAppointmentSource {
    appointments: Mutex<HashMap<ID, Vec<Appointment>>>,
    subject_names: Mutex<HashMap<ID, String>>,
    failure: Mutex<Option<FetchError>>,
    fetches: AtomicUsize,
}

impl InMemoryAppointmentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all appointments of `owner_id`
    pub fn set_appointments(&self, owner_id: &ID, appointments: Vec<Appointment>) {
        if let Ok(mut all) = self.appointments.lock() {
            all.insert(owner_id.clone(), appointments);
        }
    }

    pub fn set_subject_name(&self, subject_id: &ID, name: &str) {
        if let Ok(mut names) = self.subject_names.lock() {
            names.insert(subject_id.clone(), name.to_string());
        }
    }

    /// Every following fetch fails with `failure` until `None` is set
    pub fn set_failure(&self, failure: Option<FetchError>) {
        if let Ok(mut current) = self.failure.lock() {
            *current = failure;
        }
    }

    /// Number of appointment fetches attempted so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), FetchError> {
        match self.failure.lock() {
            Ok(failure) => match failure.as_ref() {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            },
            Err(_) => Err(FetchError::Network("lock poisoned".into())),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentSource for InMemoryAppointmentSource {
    async fn fetch_upcoming_appointments(
        &self,
        config: &SchedulerConfig,
        span: &TimeSpan,
    ) -> Result<Vec<Appointment>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let all = self
            .appointments
            .lock()
            .map_err(|_| FetchError::Network("lock poisoned".into()))?;
        let mut appointments = all
            .get(&config.owner_id)
            .map(|appointments| {
                appointments
                    .iter()
                    .filter(|a| a.is_reminder_eligible() && span.contains(a.scheduled_ts))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        appointments.sort_by_key(|a| a.scheduled_ts);
        Ok(appointments)
    }

    async fn fetch_subject_names(
        &self,
        _config: &SchedulerConfig,
        subject_ids: &[ID],
    ) -> Result<HashMap<ID, String>, FetchError> {
        self.check_failure()?;

        let names = self
            .subject_names
            .lock()
            .map_err(|_| FetchError::Network("lock poisoned".into()))?;
        Ok(subject_ids
            .iter()
            .filter_map(|id| names.get(id).map(|name| (id.clone(), name.clone())))
            .collect())
    }
}
