use crate::{
    error::ReminderError,
    foreground::ForegroundMonitor,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::request_permission::*;
use reminder_scheduler_domain::Permission;
use tracing::info;

pub async fn request_permission_controller(
    monitor: web::Data<ForegroundMonitor>,
) -> Result<HttpResponse, ReminderError> {
    execute(RequestPermissionUseCase, &monitor)
        .await
        .map(|permission| HttpResponse::Ok().json(APIResponse::new(permission)))
        .map_err(|e| match e {})
}

/// A denied permission is an answer, not an error. The scheduler keeps
/// running and showing becomes a no-op.
#[derive(Debug)]
pub struct RequestPermissionUseCase;

#[derive(Debug)]
pub enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for RequestPermissionUseCase {
    type Response = Permission;

    type Errors = UseCaseErrors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors> {
        let permission = monitor.request_permission().await;
        info!("Notification permission is: {}", permission.as_str());
        Ok(permission)
    }
}
