mod get_permission;
mod request_permission;
mod send_test_notification;

use actix_web::web;
use get_permission::get_permission_controller;
use request_permission::request_permission_controller;
use send_test_notification::send_test_notification_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/permission",
        web::get().to(get_permission_controller),
    );
    cfg.route(
        "/notifications/permission",
        web::post().to(request_permission_controller),
    );
    cfg.route(
        "/notifications/test",
        web::post().to(send_test_notification_controller),
    );
}
