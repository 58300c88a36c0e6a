use chrono::Utc;

/// Source of the current time. Every reminder decision goes through this
/// trait so that tests can drive time themselves.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// Wall clock, used when not testing
pub struct RealSys;

impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
