use reminder_scheduler_api::Application;
use reminder_scheduler_infra::{
    Config, InMemoryAppointmentSource, InMemoryNotifier, ReminderContext,
};
use reminder_scheduler_sdk::ReminderSDK;
use std::sync::Arc;

pub struct TestApp {
    pub config: Config,
    pub source: Arc<InMemoryAppointmentSource>,
    pub notifier: Arc<InMemoryNotifier>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, ReminderSDK, String) {
    let source = Arc::new(InMemoryAppointmentSource::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let mut ctx = ReminderContext::create_inmemory(source.clone(), notifier.clone());
    ctx.config.port = 0; // Random port
    ctx.config.reminder_window_minutes = 15;

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        source,
        notifier,
    };
    let sdk = ReminderSDK::new(address.clone());
    (app, sdk, address)
}
