mod config;
mod monitor;
mod notification;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::config::dtos::*;
    pub use crate::monitor::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::status::dtos::*;
}

pub use crate::config::api::*;
pub use crate::monitor::api::*;
pub use crate::notification::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
