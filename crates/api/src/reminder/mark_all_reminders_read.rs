use crate::foreground::ForegroundMonitor;
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::mark_all_reminders_read::*;

/// Clears the unread counter, the entries stay in the list
pub async fn mark_all_reminders_read_controller(
    monitor: web::Data<ForegroundMonitor>,
) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse::new(&monitor.mark_all_read()))
}
