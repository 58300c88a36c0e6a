mod config;
mod error;
mod foreground;
mod job_schedulers;
mod monitor;
mod notification;
mod reminder;
mod shared;
mod status;
mod worker;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
pub use foreground::ForegroundMonitor;
use job_schedulers::{start_heartbeat_job, start_monitor_job};
use reminder_scheduler_infra::ReminderContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;
pub use worker::{Worker, WorkerGone, WorkerHandle, WorkerState, WorkerStatus};

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    config::configure_routes(cfg);
    monitor::configure_routes(cfg);
    notification::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    monitor: ForegroundMonitor,
}

impl Application {
    pub async fn new(context: ReminderContext) -> Result<Self, std::io::Error> {
        let worker = Worker::spawn(context.clone());
        let monitor = ForegroundMonitor::new(context.clone(), worker);
        let (server, port) = Application::configure_server(context, monitor.clone()).await?;
        Application::start_job_schedulers(monitor.clone());

        Ok(Self {
            server,
            port,
            monitor,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// For hosts running in the same process
    pub fn monitor(&self) -> ForegroundMonitor {
        self.monitor.clone()
    }

    fn start_job_schedulers(monitor: ForegroundMonitor) {
        start_monitor_job(monitor.clone());
        start_heartbeat_job(monitor);
    }

    async fn configure_server(
        context: ReminderContext,
        monitor: ForegroundMonitor,
    ) -> Result<(Server, u16), std::io::Error> {
        let address = format!("0.0.0.0:{}", context.config.port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let monitor = web::Data::new(monitor);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(monitor.clone())
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
