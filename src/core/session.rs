//! Boot sequence: session info with static fallbacks.

use crate::core::api::AdminApi;
use crate::core::loader::DataSource;
use crate::models::{AdminProfile, SystemStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub admin: AdminProfile,
    pub system_status: SystemStatus,
    pub source: DataSource,
}

impl Session {
    pub fn fallback() -> Self {
        Self {
            admin: AdminProfile::fallback(),
            system_status: SystemStatus::default(),
            source: DataSource::Placeholder,
        }
    }
}

/// Startup state shown by the root component.
#[derive(Debug, Clone, PartialEq)]
pub enum BootPhase {
    Starting,
    Ready(Session),
    Failed(String),
}

impl BootPhase {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Ready(session) => Some(session),
            _ => None,
        }
    }
}

/// Fetch profile and system status. A failed request falls back to the
/// static defaults, so this never blocks startup.
pub async fn load_session(api: &AdminApi) -> Session {
    let (admin, profile_src) = match api.admin_profile().await.into_result() {
        Ok(profile) => (profile, DataSource::Remote),
        Err(reason) => {
            tracing::info!(%reason, "admin profile unavailable, using defaults");
            (AdminProfile::fallback(), DataSource::Placeholder)
        }
    };

    let (system_status, status_src) = match api.system_status().await.into_result() {
        Ok(report) => (report.status, DataSource::Remote),
        Err(reason) => {
            tracing::info!(%reason, "system status unavailable, assuming operational");
            (SystemStatus::default(), DataSource::Placeholder)
        }
    };

    tracing::info!(admin = %admin.name, status = system_status.label(), "session ready");
    Session {
        admin,
        system_status,
        source: profile_src.combine(status_src),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::core::error::FetchError;
    use crate::core::gateway::{Gateway, Method, MockTransport};

    fn api(mock: MockTransport) -> AdminApi {
        AdminApi::new(Gateway::new(Arc::new(mock)).with_base_url("https://api.test"))
    }

    #[tokio::test]
    async fn test_session_from_backend() {
        let mock = MockTransport::new()
            .ok(
                Method::Get,
                "/admin/profile",
                json!({"name": "Grace Hopper", "email": "grace@navy.mil", "role": "Admin"}),
            )
            .ok(
                Method::Get,
                "/admin/system/status",
                json!({"status": "degraded"}),
            );
        let session = load_session(&api(mock)).await;

        assert_eq!(session.admin.name, "Grace Hopper");
        assert_eq!(session.admin.avatar_text(), "GH");
        assert_eq!(session.system_status, SystemStatus::Degraded);
        assert_eq!(session.source, DataSource::Remote);
    }

    #[tokio::test]
    async fn test_session_falls_back_when_offline() {
        let mock = MockTransport::new()
            .fail(Method::Get, "/admin/profile", FetchError::Timeout)
            .status(Method::Get, "/admin/system/status", 503);
        let session = load_session(&api(mock)).await;
        assert_eq!(session, Session::fallback());
        assert_eq!(session.admin.role, "Super Admin");
    }

    #[tokio::test]
    async fn test_partial_fallback_marks_placeholder() {
        let mock = MockTransport::new().ok(
            Method::Get,
            "/admin/system/status",
            json!({"status": "maintenance"}),
        );
        let session = load_session(&api(mock)).await;
        assert_eq!(session.admin, AdminProfile::fallback());
        assert_eq!(session.system_status, SystemStatus::Maintenance);
        assert!(session.source.is_placeholder());
    }
}
