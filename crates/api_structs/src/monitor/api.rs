use crate::dtos::{AppointmentDTO, SubjectDTO};
use serde::{Deserialize, Serialize};

pub mod set_appointments {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub appointments: Vec<AppointmentDTO>,
        #[serde(default)]
        pub subjects: Vec<SubjectDTO>,
    }

    pub type APIResponse = crate::UpcomingRemindersResponse;
}

pub mod set_visibility {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub visible: bool,
    }

    pub type APIResponse = crate::UpcomingRemindersResponse;
}

pub mod send_heartbeat {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
    }
}
