mod clear_config;
mod set_config;

use actix_web::web;
use clear_config::clear_config_controller;
use set_config::set_config_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/config", web::put().to(set_config_controller));
    cfg.route("/config", web::delete().to(clear_config_controller));
}
