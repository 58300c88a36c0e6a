use crate::{
    error::ReminderError,
    foreground::ForegroundMonitor,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::set_config::*;
use reminder_scheduler_domain::{InvalidConfigError, Locale, SchedulerConfig, Tz, ID};

fn handle_error(e: UseCaseErrors) -> ReminderError {
    match e {
        UseCaseErrors::InvalidConfig(e) => ReminderError::BadClientData(e.to_string()),
        UseCaseErrors::WorkerUnavailable => {
            ReminderError::WorkerUnavailable("The config could not be handed over.".into())
        }
    }
}

pub async fn set_config_controller(
    body: web::Json<RequestBody>,
    monitor: web::Data<ForegroundMonitor>,
) -> Result<HttpResponse, ReminderError> {
    let body = body.0;
    let usecase = SetConfigUseCase {
        endpoint: body.endpoint,
        credentials: body.credentials,
        owner_id: body.owner_id,
        locale: body.locale.unwrap_or_default(),
        timezone: body.timezone,
    };

    execute(usecase, &monitor)
        .await
        .map(|config| HttpResponse::Ok().json(APIResponse::new(config)))
        .map_err(handle_error)
}

/// Login: hands the connection config to the worker, which persists it and
/// starts polling
pub struct SetConfigUseCase {
    pub endpoint: String,
    pub credentials: String,
    pub owner_id: ID,
    pub locale: Locale,
    pub timezone: Option<String>,
}

impl std::fmt::Debug for SetConfigUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetConfigUseCase")
            .field("endpoint", &self.endpoint)
            .field("owner_id", &self.owner_id)
            .field("locale", &self.locale)
            .field("timezone", &self.timezone)
            .finish()
    }
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidConfig(InvalidConfigError),
    WorkerUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetConfigUseCase {
    type Response = SchedulerConfig;

    type Errors = UseCaseErrors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors> {
        let timezone = match &self.timezone {
            Some(timezone) => {
                SchedulerConfig::parse_timezone(timezone).map_err(UseCaseErrors::InvalidConfig)?
            }
            None => Tz::UTC,
        };
        let config = SchedulerConfig::new(
            self.endpoint.clone(),
            self.credentials.clone(),
            self.owner_id.clone(),
            self.locale,
            timezone,
        )
        .map_err(UseCaseErrors::InvalidConfig)?;

        monitor
            .set_config(config.clone())
            .map_err(|_| UseCaseErrors::WorkerUnavailable)?;

        Ok(config)
    }
}
