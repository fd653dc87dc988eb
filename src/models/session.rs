//! Signed-in administrator and overall system state.

use serde::{Deserialize, Serialize};

use crate::config::fallback_session;

/// Profile of the administrator using the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AdminProfile {
    /// Static profile used when the profile endpoint is unreachable.
    pub fn fallback() -> Self {
        Self {
            name: fallback_session::ADMIN_NAME.to_string(),
            email: fallback_session::ADMIN_EMAIL.to_string(),
            role: fallback_session::ADMIN_ROLE.to_string(),
            avatar: fallback_session::ADMIN_AVATAR.to_string(),
            permissions: fallback_session::ADMIN_PERMISSIONS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    /// Avatar text, derived from the name when the backend sends none.
    pub fn avatar_text(&self) -> String {
        if self.avatar.is_empty() {
            crate::utils::format::initials(&self.name)
        } else {
            self.avatar.clone()
        }
    }
}

/// Coarse health of the platform, shown as the header indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    #[default]
    Operational,
    Degraded,
    Maintenance,
    Down,
    #[serde(other)]
    Unknown,
}

impl SystemStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Degraded => "Degraded",
            Self::Maintenance => "Maintenance",
            Self::Down => "Down",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_healthy(self) -> bool {
        matches!(self, Self::Operational)
    }
}

/// Payload of the system status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: SystemStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        let report: StatusReport =
            serde_json::from_str(r#"{"status":"degraded","message":"db slow"}"#).unwrap();
        assert_eq!(report.status, SystemStatus::Degraded);
        assert!(!report.status.is_healthy());

        let report: StatusReport = serde_json::from_str(r#"{"status":"on-fire"}"#).unwrap();
        assert_eq!(report.status, SystemStatus::Unknown);
    }

    #[test]
    fn test_fallback_profile() {
        let admin = AdminProfile::fallback();
        assert_eq!(admin.name, "System Administrator");
        assert_eq!(admin.avatar_text(), "A");
        assert_eq!(admin.permissions, vec!["all".to_string()]);
    }

    #[test]
    fn test_avatar_from_name() {
        let admin: AdminProfile =
            serde_json::from_str(r#"{"name":"Grace Hopper","email":"g@x.io","role":"Admin"}"#)
                .unwrap();
        assert_eq!(admin.avatar_text(), "GH");
    }
}
