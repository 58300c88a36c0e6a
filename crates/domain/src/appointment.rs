use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Lifecycle status of an `Appointment` as stored by the practice
/// management backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            _ => Err(format!("Unknown appointment status: {}", s)),
        }
    }
}

/// An `Appointment` is owned by the external CRUD system and is read-only
/// to the scheduler. Every fetch is treated as a fresh snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: ID,
    /// Start of the appointment in millis since epoch
    pub scheduled_ts: i64,
    /// The person the appointment is with
    pub subject_id: Option<ID>,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Only `Scheduled` appointments ever produce a reminder
    pub fn is_reminder_eligible(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }

    pub fn has_started(&self, now_ts: i64) -> bool {
        self.scheduled_ts <= now_ts
    }

    /// The instant at which a reminder `window_minutes` ahead should be shown
    pub fn remind_at(&self, window_minutes: i64) -> i64 {
        self.scheduled_ts - window_minutes * 60 * 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_scheduled_appointments_are_eligible() {
        let mut appointment = Appointment {
            id: ID::new(),
            scheduled_ts: 1000 * 60 * 60,
            subject_id: None,
            status: AppointmentStatus::Scheduled,
        };
        assert!(appointment.is_reminder_eligible());
        for status in [
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ] {
            appointment.status = status;
            assert!(!appointment.is_reminder_eligible());
        }
    }

    #[test]
    fn it_computes_remind_at() {
        let appointment = Appointment {
            id: ID::new(),
            scheduled_ts: 1000 * 60 * 60,
            subject_id: None,
            status: AppointmentStatus::Scheduled,
        };
        assert_eq!(appointment.remind_at(15), 1000 * 60 * 45);
        assert!(appointment.has_started(1000 * 60 * 60));
        assert!(!appointment.has_started(1000 * 60 * 60 - 1));
    }

    #[test]
    fn status_roundtrips_through_its_wire_name() {
        assert_eq!("no_show".parse::<AppointmentStatus>(), Ok(AppointmentStatus::NoShow));
        assert_eq!(AppointmentStatus::Cancelled.to_string(), "cancelled");
        assert!("noshow".parse::<AppointmentStatus>().is_err());
    }
}
