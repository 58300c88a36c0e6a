use crate::{
    error::ReminderError,
    foreground::ForegroundMonitor,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::dismiss_reminder::*;
use reminder_scheduler_domain::{AlertId, UpcomingAlert};

fn handle_error(e: UseCaseErrors) -> ReminderError {
    match e {
        UseCaseErrors::NotFound(alert_id) => ReminderError::NotFound(format!(
            "The reminder with id: {}, was not found.",
            alert_id
        )),
    }
}

pub async fn dismiss_reminder_controller(
    path_params: web::Path<PathParams>,
    monitor: web::Data<ForegroundMonitor>,
) -> Result<HttpResponse, ReminderError> {
    let alert_id = path_params
        .alert_id
        .parse::<AlertId>()
        .map_err(ReminderError::BadClientData)?;
    let usecase = DismissReminderUseCase { alert_id };

    execute(usecase, &monitor)
        .await
        .map(|alert| HttpResponse::Ok().json(APIResponse::new(alert)))
        .map_err(handle_error)
}

/// Removes one entry from the reminder list for the rest of the session
#[derive(Debug)]
pub struct DismissReminderUseCase {
    pub alert_id: AlertId,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(AlertId),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DismissReminderUseCase {
    type Response = UpcomingAlert;

    type Errors = UseCaseErrors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors> {
        monitor
            .dismiss(&self.alert_id)
            .ok_or_else(|| UseCaseErrors::NotFound(self.alert_id.clone()))
    }
}
