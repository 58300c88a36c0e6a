use crate::foreground::ForegroundMonitor;
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::get_permission::*;

pub async fn get_permission_controller(monitor: web::Data<ForegroundMonitor>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse::new(monitor.permission().await))
}
