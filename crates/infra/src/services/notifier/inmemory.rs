use super::{INotifier, NotifyError};
use reminder_scheduler_domain::{Notification, Permission};
use std::sync::Mutex;

/// Records shown notifications instead of delivering them
pub struct InMemoryNotifier {
    permission: Mutex<Permission>,
    /// What the user answers when asked for permission
    answer: Mutex<Permission>,
    shown: Mutex<Vec<Notification>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::with_permission(Permission::Granted)
    }

    pub fn with_permission(permission: Permission) -> Self {
        Self {
            permission: Mutex::new(permission),
            answer: Mutex::new(Permission::Granted),
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn set_permission(&self, permission: Permission) {
        if let Ok(mut current) = self.permission.lock() {
            *current = permission;
        }
    }

    pub fn set_permission_answer(&self, answer: Permission) {
        if let Ok(mut current) = self.answer.lock() {
            *current = answer;
        }
    }

    /// Every successful `show` call, in order
    pub fn shown(&self) -> Vec<Notification> {
        self.shown
            .lock()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }

    /// What the user would see: the latest notification of every tag
    pub fn visible(&self) -> Vec<Notification> {
        let mut visible: Vec<Notification> = Vec::new();
        for notification in self.shown() {
            match visible.iter_mut().find(|n| n.tag == notification.tag) {
                Some(existing) => *existing = notification,
                None => visible.push(notification),
            }
        }
        visible
    }

    fn current_permission(&self) -> Permission {
        self.permission
            .lock()
            .map(|p| *p)
            .unwrap_or(Permission::Unsupported)
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn permission(&self) -> Permission {
        self.current_permission()
    }

    async fn request_permission(&self) -> Permission {
        if self.current_permission() != Permission::NotRequested {
            return self.current_permission();
        }
        let answer = self.answer.lock().map(|a| *a).unwrap_or(Permission::Denied);
        self.set_permission(answer);
        answer
    }

    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        let permission = self.current_permission();
        if !permission.is_granted() {
            return Err(NotifyError::NotPermitted(permission));
        }
        self.shown
            .lock()
            .map_err(|_| NotifyError::Delivery("lock poisoned".into()))?
            .push(notification.clone());
        Ok(())
    }
}
