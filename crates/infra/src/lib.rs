mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{FileKVRepo, IKVRepo, InMemoryKVRepo, ReminderStateRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::info;

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub services: Services,
}

impl ReminderContext {
    fn create(config: Config) -> Self {
        let notifier: Arc<dyn INotifier> = match &config.notification_webhook_url {
            Some(url) => {
                info!("Notifications are delivered to webhook: {}", url);
                Arc::new(WebhookNotifier::new(
                    url.clone(),
                    config.notification_webhook_key.clone(),
                ))
            }
            None => {
                info!("NOTIFICATION_WEBHOOK_URL is not set, notifications will only be logged");
                Arc::new(TracingNotifier)
            }
        };

        Self {
            repos: Repos::create_file(config.state_dir.clone()),
            services: Services {
                appointment_source: Arc::new(RestAppointmentSource::new()),
                notifier,
            },
            config,
            sys: Arc::new(RealSys),
        }
    }

    /// Context without any outside effects. The given services let the
    /// caller keep a concrete handle to inspect and steer them.
    pub fn create_inmemory(
        appointment_source: Arc<InMemoryAppointmentSource>,
        notifier: Arc<InMemoryNotifier>,
    ) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys),
            services: Services {
                appointment_source,
                notifier,
            },
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> ReminderContext {
    ReminderContext::create(Config::new())
}
