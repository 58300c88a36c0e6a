mod inmemory;
mod tracing_notifier;
mod webhook;

pub use inmemory::InMemoryNotifier;
pub use tracing_notifier::TracingNotifier;
pub use webhook::WebhookNotifier;

use reminder_scheduler_domain::{Notification, Permission};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotifyError {
    #[error("Not permitted to show notifications, permission is: {}", .0.as_str())]
    NotPermitted(Permission),
    #[error("Notification could not be delivered: {0}")]
    Delivery(String),
}

/// The platform facility that shows notifications to the user
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn permission(&self) -> Permission;
    /// Asks the user for permission if that has not been done yet and
    /// returns the resulting permission
    async fn request_permission(&self) -> Permission;
    /// Shows `notification`, replacing any visible notification with the same tag
    async fn show(&self, notification: &Notification) -> Result<(), NotifyError>;
}
