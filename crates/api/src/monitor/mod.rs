mod send_heartbeat;
mod set_appointments;
mod set_visibility;

use actix_web::web;
use send_heartbeat::send_heartbeat_controller;
use set_appointments::set_appointments_controller;
use set_visibility::set_visibility_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/monitor/appointments",
        web::put().to(set_appointments_controller),
    );
    cfg.route(
        "/monitor/visibility",
        web::post().to(set_visibility_controller),
    );
    cfg.route(
        "/monitor/heartbeat",
        web::post().to(send_heartbeat_controller),
    );
}
