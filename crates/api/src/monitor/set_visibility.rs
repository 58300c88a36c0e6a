use crate::{
    error::ReminderError,
    foreground::ForegroundMonitor,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::set_visibility::*;
use reminder_scheduler_domain::UpcomingAlerts;

fn handle_error(e: UseCaseErrors) -> ReminderError {
    match e {
        UseCaseErrors::WorkerUnavailable => {
            ReminderError::WorkerUnavailable("The worker could not be woken up.".into())
        }
    }
}

pub async fn set_visibility_controller(
    body: web::Json<RequestBody>,
    monitor: web::Data<ForegroundMonitor>,
) -> Result<HttpResponse, ReminderError> {
    let usecase = SetVisibilityUseCase {
        visible: body.visible,
    };

    execute(usecase, &monitor)
        .await
        .map(|upcoming| HttpResponse::Ok().json(APIResponse::new(&upcoming)))
        .map_err(handle_error)
}

/// Regaining visibility wakes the worker and re-evaluates right away
#[derive(Debug)]
pub struct SetVisibilityUseCase {
    pub visible: bool,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    WorkerUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetVisibilityUseCase {
    type Response = UpcomingAlerts;

    type Errors = UseCaseErrors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors> {
        monitor
            .on_visibility_change(self.visible)
            .await
            .map_err(|_| UseCaseErrors::WorkerUnavailable)?;
        Ok(monitor.upcoming())
    }
}
