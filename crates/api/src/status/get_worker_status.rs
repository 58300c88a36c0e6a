use crate::{
    error::ReminderError,
    foreground::ForegroundMonitor,
    shared::usecase::{execute, UseCase},
    worker::WorkerStatus,
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::{dtos::WorkerStatusDTO, get_worker_status::*};

fn handle_error(e: UseCaseErrors) -> ReminderError {
    match e {
        UseCaseErrors::WorkerUnavailable => {
            ReminderError::WorkerUnavailable("The worker did not answer.".into())
        }
    }
}

pub async fn get_worker_status_controller(
    monitor: web::Data<ForegroundMonitor>,
) -> Result<HttpResponse, ReminderError> {
    execute(GetWorkerStatusUseCase, &monitor)
        .await
        .map(|status| {
            HttpResponse::Ok().json(APIResponse {
                worker: WorkerStatusDTO {
                    state: status.state.to_string(),
                    owner_id: status.owner_id,
                    pending_timers: status.pending_timers,
                    notified_count: status.notified_count,
                    cycles_completed: status.cycles_completed,
                    last_heartbeat_ts: status.last_heartbeat_ts,
                },
            })
        })
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetWorkerStatusUseCase;

#[derive(Debug)]
pub enum UseCaseErrors {
    WorkerUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetWorkerStatusUseCase {
    type Response = WorkerStatus;

    type Errors = UseCaseErrors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors> {
        monitor
            .worker()
            .status()
            .await
            .map_err(|_| UseCaseErrors::WorkerUnavailable)
    }
}
