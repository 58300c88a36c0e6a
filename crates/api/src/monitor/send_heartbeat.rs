use crate::{
    error::ReminderError,
    foreground::ForegroundMonitor,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::send_heartbeat::*;

fn handle_error(e: UseCaseErrors) -> ReminderError {
    match e {
        UseCaseErrors::WorkerUnavailable => {
            ReminderError::WorkerUnavailable("The heartbeat could not be delivered.".into())
        }
    }
}

pub async fn send_heartbeat_controller(
    monitor: web::Data<ForegroundMonitor>,
) -> Result<HttpResponse, ReminderError> {
    execute(SendHeartbeatUseCase, &monitor)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "Heartbeat delivered".into(),
            })
        })
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct SendHeartbeatUseCase;

#[derive(Debug)]
pub enum UseCaseErrors {
    WorkerUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendHeartbeatUseCase {
    type Response = ();

    type Errors = UseCaseErrors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors> {
        monitor
            .heartbeat()
            .map_err(|_| UseCaseErrors::WorkerUnavailable)
    }
}
