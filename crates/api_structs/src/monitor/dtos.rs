use reminder_scheduler_domain::{Appointment, AppointmentStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDTO {
    pub id: ID,
    pub scheduled_ts: i64,
    #[serde(default)]
    pub subject_id: Option<ID>,
    pub status: AppointmentStatus,
}

impl AppointmentDTO {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            scheduled_ts: appointment.scheduled_ts,
            subject_id: appointment.subject_id,
            status: appointment.status,
        }
    }

    pub fn into_domain(self) -> Appointment {
        Appointment {
            id: self.id,
            scheduled_ts: self.scheduled_ts,
            subject_id: self.subject_id,
            status: self.status,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDTO {
    pub id: ID,
    pub name: String,
}
