use crate::{
    appointment::Appointment,
    reminder::{minutes_left, AlertId},
    shared::entity::ID,
};
use std::collections::{HashMap, HashSet};

/// An entry of the in-page reminder list
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingAlert {
    pub id: AlertId,
    pub appointment_id: ID,
    pub subject_name: Option<String>,
    pub minutes_left: i64,
    pub scheduled_ts: i64,
    pub read: bool,
}

/// Returns the appointments that start within the next `window_minutes`,
/// in the order they were given. Appointments that already started are not
/// included.
pub fn evaluate(
    appointments: &[Appointment],
    subject_names: &HashMap<ID, String>,
    window_minutes: i64,
    now_ts: i64,
) -> Vec<UpcomingAlert> {
    let window_millis = window_minutes * 60 * 1000;

    appointments
        .iter()
        .filter(|a| a.is_reminder_eligible())
        .filter(|a| {
            let diff = a.scheduled_ts - now_ts;
            diff > 0 && diff <= window_millis
        })
        .map(|a| UpcomingAlert {
            id: AlertId::new(&a.id, window_minutes),
            appointment_id: a.id.clone(),
            subject_name: a
                .subject_id
                .as_ref()
                .and_then(|subject_id| subject_names.get(subject_id))
                .cloned(),
            minutes_left: minutes_left(a.scheduled_ts, now_ts),
            scheduled_ts: a.scheduled_ts,
            read: false,
        })
        .collect()
}

/// The reminder list of one page session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpcomingAlerts {
    alerts: Vec<UpcomingAlert>,
    dismissed: HashSet<AlertId>,
}

impl UpcomingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with a fresh evaluation.
    ///
    /// Entries already present keep their read flag, dismissed entries stay
    /// dismissed. Returns the entries that were not in the list before.
    pub fn refresh(&mut self, fresh: Vec<UpcomingAlert>) -> Vec<UpcomingAlert> {
        let mut added = Vec::new();
        let mut alerts = Vec::with_capacity(fresh.len());

        for mut alert in fresh {
            if self.dismissed.contains(&alert.id) {
                continue;
            }
            match self.alerts.iter().find(|a| a.id == alert.id) {
                Some(existing) => alert.read = existing.read,
                None => added.push(alert.clone()),
            }
            alerts.push(alert);
        }

        self.alerts = alerts;
        added
    }

    /// Removes entries whose appointment has started and counts down the
    /// rest. Returns true if the list changed.
    pub fn drop_started(&mut self, now_ts: i64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.scheduled_ts > now_ts);
        let mut changed = before != self.alerts.len();
        for alert in self.alerts.iter_mut() {
            let left = minutes_left(alert.scheduled_ts, now_ts);
            if alert.minutes_left != left {
                alert.minutes_left = left;
                changed = true;
            }
        }
        changed
    }

    pub fn mark_all_read(&mut self) {
        for alert in self.alerts.iter_mut() {
            alert.read = true;
        }
    }

    pub fn dismiss(&mut self, alert_id: &AlertId) -> Option<UpcomingAlert> {
        let pos = self.alerts.iter().position(|a| &a.id == alert_id)?;
        self.dismissed.insert(alert_id.clone());
        Some(self.alerts.remove(pos))
    }

    pub fn unread_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.read).count()
    }

    pub fn alerts(&self) -> &[UpcomingAlert] {
        &self.alerts
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
        self.dismissed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::AppointmentStatus;

    const MINUTE: i64 = 1000 * 60;
    const NOW: i64 = 1613862000000;

    fn appointment(id: &str, in_millis: i64, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: id.parse().unwrap(),
            scheduled_ts: NOW + in_millis,
            subject_id: Some("c1".parse().unwrap()),
            status,
        }
    }

    fn names() -> HashMap<ID, String> {
        let mut names = HashMap::new();
        names.insert("c1".parse().unwrap(), "Ayşe Yılmaz".to_string());
        names
    }

    #[test]
    fn it_evaluates_appointments_inside_window() {
        let appointments = vec![
            appointment("a1", 14 * MINUTE, AppointmentStatus::Scheduled),
            appointment("a2", 40 * MINUTE, AppointmentStatus::Scheduled),
            appointment("a3", 5 * MINUTE, AppointmentStatus::Cancelled),
            appointment("a4", -MINUTE, AppointmentStatus::Scheduled),
            appointment("a5", 15 * MINUTE, AppointmentStatus::Scheduled),
            appointment("a6", 0, AppointmentStatus::Scheduled),
        ];
        let alerts = evaluate(&appointments, &names(), 15, NOW);
        let ids = alerts
            .iter()
            .map(|a| a.appointment_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a1", "a5"]);
        assert_eq!(alerts[0].minutes_left, 14);
        assert_eq!(alerts[0].subject_name, Some("Ayşe Yılmaz".to_string()));
        assert!(!alerts[0].read);
    }

    #[test]
    fn refresh_keeps_read_flags_and_reports_new_entries() {
        let mut list = UpcomingAlerts::new();
        let a1 = vec![appointment("a1", 14 * MINUTE, AppointmentStatus::Scheduled)];
        assert_eq!(list.refresh(evaluate(&a1, &names(), 15, NOW)).len(), 1);
        list.mark_all_read();
        assert_eq!(list.unread_count(), 0);

        let both = vec![
            appointment("a1", 14 * MINUTE, AppointmentStatus::Scheduled),
            appointment("a2", 10 * MINUTE, AppointmentStatus::Scheduled),
        ];
        let added = list.refresh(evaluate(&both, &names(), 15, NOW + MINUTE));
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].appointment_id.as_str(), "a2");
        assert_eq!(list.alerts().len(), 2);
        assert_eq!(list.unread_count(), 1);
        assert_eq!(list.alerts()[0].minutes_left, 13);
    }

    #[test]
    fn dismissed_entries_are_not_resurrected() {
        let mut list = UpcomingAlerts::new();
        let a1 = vec![appointment("a1", 14 * MINUTE, AppointmentStatus::Scheduled)];
        list.refresh(evaluate(&a1, &names(), 15, NOW));
        let alert_id = list.alerts()[0].id.clone();

        assert!(list.dismiss(&alert_id).is_some());
        assert_eq!(list.unread_count(), 0);
        assert!(list.dismiss(&alert_id).is_none());

        assert!(list.refresh(evaluate(&a1, &names(), 15, NOW)).is_empty());
        assert!(list.alerts().is_empty());
    }

    #[test]
    fn started_entries_expire() {
        let mut list = UpcomingAlerts::new();
        let a1 = vec![appointment("a1", 2 * MINUTE, AppointmentStatus::Scheduled)];
        list.refresh(evaluate(&a1, &names(), 15, NOW));

        assert!(!list.drop_started(NOW + MINUTE / 2));
        assert!(list.drop_started(NOW + MINUTE));
        assert_eq!(list.alerts()[0].minutes_left, 1);
        assert!(!list.drop_started(NOW + MINUTE + 1000));
        assert!(list.drop_started(NOW + 2 * MINUTE));
        assert!(list.alerts().is_empty());
    }
}
