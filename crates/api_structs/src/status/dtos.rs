use reminder_scheduler_domain::ID;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatusDTO {
    /// One of `uninitialized`, `idle`, `polling` or `stopped`
    pub state: String,
    pub owner_id: Option<ID>,
    pub pending_timers: usize,
    pub notified_count: usize,
    pub cycles_completed: u64,
    pub last_heartbeat_ts: Option<i64>,
}
