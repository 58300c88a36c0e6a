use crate::foreground::ForegroundMonitor;
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::get_upcoming_reminders::*;

pub async fn get_upcoming_reminders_controller(
    monitor: web::Data<ForegroundMonitor>,
) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse::new(&monitor.upcoming()))
}
