use super::{INotifier, NotifyError};
use reminder_scheduler_domain::{Notification, Permission};
use tracing::info;

/// Writes notifications to the log, used when no delivery channel is configured
pub struct TracingNotifier;

#[async_trait::async_trait]
impl INotifier for TracingNotifier {
    async fn permission(&self) -> Permission {
        Permission::Granted
    }

    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            tag = %notification.tag,
            title = %notification.title,
            "{}",
            notification.body
        );
        Ok(())
    }
}
