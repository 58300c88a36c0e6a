use crate::{
    error::ReminderError,
    foreground::ForegroundMonitor,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::send_test_notification::*;
use reminder_scheduler_domain::Notification;
use reminder_scheduler_infra::NotifyError;

fn handle_error(e: UseCaseErrors) -> ReminderError {
    match e {
        UseCaseErrors::NotPermitted(permission) => ReminderError::PermissionDenied(format!(
            "Notification permission is: {}",
            permission.as_str()
        )),
        UseCaseErrors::Delivery(_) => ReminderError::InternalError,
    }
}

pub async fn send_test_notification_controller(
    monitor: web::Data<ForegroundMonitor>,
) -> Result<HttpResponse, ReminderError> {
    execute(SendTestNotificationUseCase, &monitor)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse { notification }))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct SendTestNotificationUseCase;

pub type UseCaseErrors = NotifyError;

#[async_trait::async_trait(?Send)]
impl UseCase for SendTestNotificationUseCase {
    type Response = Notification;

    type Errors = UseCaseErrors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors> {
        monitor.send_test_notification().await
    }
}
