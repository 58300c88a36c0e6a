use crate::{config::Locale, reminder::AlertId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Permission of the scheduler to show platform notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    Granted,
    Denied,
    Unsupported,
    /// The user has not been asked yet
    #[serde(rename = "default")]
    NotRequested,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Unsupported => "unsupported",
            Self::NotRequested => "default",
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            "unsupported" => Ok(Self::Unsupported),
            "default" => Ok(Self::NotRequested),
            _ => Err(format!("Unknown permission: {}", s)),
        }
    }
}

pub const OPEN_ACTION: &str = "open";
pub const DISMISS_ACTION: &str = "dismiss";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// A user visible notification. Notifications with the same `tag` replace
/// each other on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub tag: String,
    /// Where the "open" action navigates to
    pub open_url: String,
    pub actions: Vec<NotificationAction>,
    pub require_interaction: bool,
}

struct Texts {
    reminder_title: &'static str,
    test_title: &'static str,
    test_body: &'static str,
    fallback_subject: &'static str,
    open: &'static str,
    dismiss: &'static str,
}

fn texts(locale: Locale) -> Texts {
    match locale {
        Locale::Tr => Texts {
            reminder_title: "🔔 Randevu Hatırlatması",
            test_title: "🔔 Test Bildirimi",
            test_body: "Bildirimler çalışıyor!",
            fallback_subject: "Danışan",
            open: "📅 Aç",
            dismiss: "✖ Kapat",
        },
        Locale::En => Texts {
            reminder_title: "🔔 Appointment Reminder",
            test_title: "🔔 Test Notification",
            test_body: "Notifications are working!",
            fallback_subject: "Client",
            open: "📅 Open",
            dismiss: "✖ Close",
        },
    }
}

fn reminder_body(locale: Locale, subject_name: &str, minutes_left: i64) -> String {
    match locale {
        Locale::Tr => format!(
            "{} dakika sonra {} ile görüşmeniz var!",
            minutes_left, subject_name
        ),
        Locale::En => format!(
            "You have a session with {} in {} minutes!",
            subject_name, minutes_left
        ),
    }
}

impl Notification {
    pub fn reminder(
        alert_id: &AlertId,
        subject_name: Option<&str>,
        minutes_left: i64,
        locale: Locale,
        open_url: &str,
    ) -> Self {
        let t = texts(locale);
        let subject_name = match subject_name.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => t.fallback_subject,
        };

        Self {
            title: t.reminder_title.into(),
            body: reminder_body(locale, subject_name, minutes_left),
            tag: alert_id.to_string(),
            open_url: open_url.into(),
            actions: Self::actions(&t),
            require_interaction: true,
        }
    }

    /// Lets the user verify that notifications reach them
    pub fn test(locale: Locale, open_url: &str, now_ts: i64) -> Self {
        let t = texts(locale);
        Self {
            title: t.test_title.into(),
            body: t.test_body.into(),
            tag: format!("test_{}", now_ts),
            open_url: open_url.into(),
            actions: Self::actions(&t),
            require_interaction: false,
        }
    }

    fn actions(t: &Texts) -> Vec<NotificationAction> {
        vec![
            NotificationAction {
                action: OPEN_ACTION.into(),
                title: t.open.into(),
            },
            NotificationAction {
                action: DISMISS_ACTION.into(),
                title: t.dismiss.into(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity::ID;

    #[test]
    fn reminder_is_localized() {
        let alert_id = AlertId::new(&"a1".parse::<ID>().unwrap(), 15);

        let tr = Notification::reminder(&alert_id, Some("Ayşe Yılmaz"), 14, Locale::Tr, "/");
        assert_eq!(tr.title, "🔔 Randevu Hatırlatması");
        assert_eq!(tr.body, "14 dakika sonra Ayşe Yılmaz ile görüşmeniz var!");
        assert_eq!(tr.tag, "a1_15");
        assert!(tr.require_interaction);

        let en = Notification::reminder(&alert_id, Some("Jane Doe"), 5, Locale::En, "/");
        assert_eq!(en.title, "🔔 Appointment Reminder");
        assert_eq!(en.body, "You have a session with Jane Doe in 5 minutes!");
    }

    #[test]
    fn reminder_falls_back_to_generic_subject() {
        let alert_id = AlertId::new(&ID::new(), 15);
        let n = Notification::reminder(&alert_id, None, 3, Locale::Tr, "/");
        assert!(n.body.contains("Danışan"));
        let n = Notification::reminder(&alert_id, Some(" "), 3, Locale::En, "/");
        assert!(n.body.contains("Client"));
    }

    #[test]
    fn reminder_has_open_and_dismiss_actions() {
        let alert_id = AlertId::new(&ID::new(), 15);
        let n = Notification::reminder(&alert_id, None, 3, Locale::En, "/calendar");
        let actions = n.actions.iter().map(|a| a.action.as_str()).collect::<Vec<_>>();
        assert_eq!(actions, vec![OPEN_ACTION, DISMISS_ACTION]);
        assert_eq!(n.open_url, "/calendar");
    }

    #[test]
    fn permission_uses_platform_names() {
        assert_eq!("default".parse::<Permission>(), Ok(Permission::NotRequested));
        assert_eq!(Permission::Unsupported.as_str(), "unsupported");
        assert!(Permission::Granted.is_granted());
        assert!(!Permission::Denied.is_granted());
    }
}
