use crate::dtos::WorkerStatusDTO;
use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
    }
}

pub mod get_worker_status {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub worker: WorkerStatusDTO,
    }
}
