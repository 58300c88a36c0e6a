use reminder_scheduler_domain::{Notification, SchedulerConfig, ID};
use std::fmt::Display;
use tokio::sync::oneshot;

/// Messages the foreground monitor sends to the worker
#[derive(Debug)]
pub enum WorkerMessage {
    SetConfig(SchedulerConfig),
    ClearConfig,
    Heartbeat,
    /// Show a notification on behalf of the monitor
    ShowNotification(Notification),
    Status(oneshot::Sender<WorkerStatus>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Persisted config has not been loaded yet
    Uninitialized,
    /// No config, waiting for one to arrive
    Idle,
    Polling,
    /// Config was cleared. Behaves as `Idle`.
    Stopped,
}

impl WorkerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Idle => "idle",
            Self::Polling => "polling",
            Self::Stopped => "stopped",
        }
    }
}

impl Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerStatus {
    pub state: WorkerState,
    pub owner_id: Option<ID>,
    pub pending_timers: usize,
    pub notified_count: usize,
    pub cycles_completed: u64,
    pub last_heartbeat_ts: Option<i64>,
}
