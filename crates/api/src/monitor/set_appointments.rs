use crate::{
    error::ReminderError,
    foreground::ForegroundMonitor,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::set_appointments::*;
use reminder_scheduler_domain::{Appointment, UpcomingAlerts, ID};
use std::collections::HashMap;

pub async fn set_appointments_controller(
    body: web::Json<RequestBody>,
    monitor: web::Data<ForegroundMonitor>,
) -> Result<HttpResponse, ReminderError> {
    let body = body.0;
    let usecase = SetAppointmentsUseCase {
        appointments: body
            .appointments
            .into_iter()
            .map(|a| a.into_domain())
            .collect(),
        subject_names: body
            .subjects
            .into_iter()
            .map(|subject| (subject.id, subject.name))
            .collect(),
    };

    execute(usecase, &monitor)
        .await
        .map(|upcoming| HttpResponse::Ok().json(APIResponse::new(&upcoming)))
        .map_err(|e| match e {})
}

/// The host pushes the appointment list it holds in memory. It is evaluated
/// right away and on every following monitor tick.
#[derive(Debug)]
pub struct SetAppointmentsUseCase {
    pub appointments: Vec<Appointment>,
    pub subject_names: HashMap<ID, String>,
}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for SetAppointmentsUseCase {
    type Response = UpcomingAlerts;

    type Errors = UseCaseErrors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors> {
        let appointments = std::mem::take(&mut self.appointments);
        let subject_names = std::mem::take(&mut self.subject_names);
        Ok(monitor.set_appointments(appointments, subject_names).await)
    }
}
