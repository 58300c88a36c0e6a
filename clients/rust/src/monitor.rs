use crate::{APIResponse, BaseClient};
use reminder_scheduler_api_structs::{dtos::*, *};
use reminder_scheduler_domain::{Appointment, ID};
use reqwest::StatusCode;
use std::{collections::HashMap, sync::Arc};

#[derive(Clone)]
pub struct MonitorClient {
    base: Arc<BaseClient>,
}

pub struct SetAppointmentsInput {
    pub appointments: Vec<Appointment>,
    pub subject_names: HashMap<ID, String>,
}

impl MonitorClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn set_appointments(
        &self,
        input: SetAppointmentsInput,
    ) -> APIResponse<set_appointments::APIResponse> {
        let body = set_appointments::RequestBody {
            appointments: input
                .appointments
                .into_iter()
                .map(AppointmentDTO::new)
                .collect(),
            subjects: input
                .subject_names
                .into_iter()
                .map(|(id, name)| SubjectDTO { id, name })
                .collect(),
        };
        self.base
            .put(body, "monitor/appointments".into(), StatusCode::OK)
            .await
    }

    pub async fn set_visibility(
        &self,
        visible: bool,
    ) -> APIResponse<set_visibility::APIResponse> {
        let body = set_visibility::RequestBody { visible };
        self.base
            .post(body, "monitor/visibility".into(), StatusCode::OK)
            .await
    }

    pub async fn heartbeat(&self) -> APIResponse<send_heartbeat::APIResponse> {
        self.base
            .post((), "monitor/heartbeat".into(), StatusCode::OK)
            .await
    }
}
