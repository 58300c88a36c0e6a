use crate::{
    error::ReminderError,
    foreground::ForegroundMonitor,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::clear_config::*;

fn handle_error(e: UseCaseErrors) -> ReminderError {
    match e {
        UseCaseErrors::WorkerUnavailable => {
            ReminderError::WorkerUnavailable("The worker could not be stopped.".into())
        }
    }
}

pub async fn clear_config_controller(
    monitor: web::Data<ForegroundMonitor>,
) -> Result<HttpResponse, ReminderError> {
    execute(ClearConfigUseCase, &monitor)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "Config cleared".into(),
            })
        })
        .map_err(handle_error)
}

/// Logout: stops the worker, which cancels its timers and wipes its
/// persisted state
#[derive(Debug)]
pub struct ClearConfigUseCase;

#[derive(Debug)]
pub enum UseCaseErrors {
    WorkerUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ClearConfigUseCase {
    type Response = ();

    type Errors = UseCaseErrors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors> {
        monitor
            .clear_config()
            .map_err(|_| UseCaseErrors::WorkerUnavailable)
    }
}
