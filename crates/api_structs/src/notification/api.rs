use reminder_scheduler_domain::{Notification, Permission};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResponse {
    pub permission: Permission,
}

impl PermissionResponse {
    pub fn new(permission: Permission) -> Self {
        Self { permission }
    }
}

pub mod get_permission {
    use super::*;

    pub type APIResponse = PermissionResponse;
}

pub mod request_permission {
    use super::*;

    pub type APIResponse = PermissionResponse;
}

pub mod send_test_notification {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notification: Notification,
    }
}
