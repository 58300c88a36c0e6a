mod dismiss_reminder;
mod get_upcoming_reminders;
mod mark_all_reminders_read;

use actix_web::web;
use dismiss_reminder::dismiss_reminder_controller;
use get_upcoming_reminders::get_upcoming_reminders_controller;
use mark_all_reminders_read::mark_all_reminders_read_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::get().to(get_upcoming_reminders_controller));
    cfg.route(
        "/reminders/read",
        web::post().to(mark_all_reminders_read_controller),
    );
    cfg.route(
        "/reminders/{alert_id}",
        web::delete().to(dismiss_reminder_controller),
    );
}
