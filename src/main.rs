mod telemetry;

use reminder_scheduler_api::Application;
use reminder_scheduler_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("reminder_scheduler".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context();

    let app = Application::new(context).await?;
    app.start().await
}
