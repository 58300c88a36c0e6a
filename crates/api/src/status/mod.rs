mod get_worker_status;

use actix_web::{web, HttpResponse};
use get_worker_status::get_worker_status_controller;
use reminder_scheduler_api_structs::get_service_health::*;

async fn status() -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
    cfg.route("/worker", web::get().to(get_worker_status_controller));
}
