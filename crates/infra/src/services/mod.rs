mod appointments;
mod notifier;

pub use appointments::{
    FetchError, IAppointmentSource, InMemoryAppointmentSource, RestAppointmentSource,
};
pub use notifier::{
    INotifier, InMemoryNotifier, NotifyError, TracingNotifier, WebhookNotifier,
};
use std::sync::Arc;

/// External systems the scheduler talks to
#[derive(Clone)]
pub struct Services {
    pub appointment_source: Arc<dyn IAppointmentSource>,
    pub notifier: Arc<dyn INotifier>,
}
