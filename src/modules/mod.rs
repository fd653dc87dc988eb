//! Module registry: one data lifecycle per page.
//!
//! [`load`] is the single dispatch point from a [`PageKey`] to the backend
//! calls that feed its screen. Each arm goes through the fallback contract,
//! so a page either gets remote data, its placeholder, or a
//! [`ModuleError`] the page renders as a retryable error state.

use crate::core::api::{AdminApi, Page};
use crate::core::error::ModuleError;
use crate::core::gateway::Envelope;
use crate::core::loader::{DataSource, Fallback, Loaded, load_with_fallback};
use crate::core::navigation::PageKey;
use crate::core::optimistic::Keyed;
use crate::models::{
    AdminData, AiData, AnalyticsData, Course, CourseList, DashboardData, SystemMetrics,
    SystemSettings, SystemStatus, Timeframe, User, UserList, placeholder_backups,
    placeholder_logs,
};

/// Data shown by one page.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleData {
    Dashboard(DashboardData),
    Users(UserList),
    Courses(CourseList),
    Analytics(AnalyticsData),
    AiManagement(AiData),
    Administration(AdminData),
}

impl ModuleData {
    pub fn page(&self) -> PageKey {
        match self {
            Self::Dashboard(_) => PageKey::Dashboard,
            Self::Users(_) => PageKey::Users,
            Self::Courses(_) => PageKey::Courses,
            Self::Analytics(_) => PageKey::Analytics,
            Self::AiManagement(_) => PageKey::AiManagement,
            Self::Administration(_) => PageKey::Administration,
        }
    }

    /// The placeholder a page shows when its load fails.
    pub fn placeholder(page: PageKey) -> Self {
        match page {
            PageKey::Dashboard => Self::Dashboard(DashboardData::placeholder()),
            PageKey::Users => Self::Users(UserList::placeholder()),
            PageKey::Courses => Self::Courses(CourseList::placeholder()),
            PageKey::Analytics => Self::Analytics(AnalyticsData::placeholder()),
            PageKey::AiManagement => Self::AiManagement(AiData::placeholder()),
            PageKey::Administration => Self::Administration(AdminData::placeholder()),
        }
    }
}

/// Inputs that change what a page loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub timeframe: Timeframe,
}

/// Load the data for `page`.
pub async fn load(
    page: PageKey,
    api: &AdminApi,
    options: LoadOptions,
) -> Result<Loaded<ModuleData>, ModuleError> {
    tracing::debug!(page = page.key(), "loading module data");
    let loaded = match page {
        PageKey::Dashboard => load_with_fallback(page, api.dashboard())
            .await?
            .map(ModuleData::Dashboard),
        PageKey::Users => load_with_fallback(page, api.users(Page::default(), &[]))
            .await?
            .map(ModuleData::Users),
        PageKey::Courses => load_with_fallback(page, api.courses(&[]))
            .await?
            .map(ModuleData::Courses),
        PageKey::Analytics => load_with_fallback(page, api.analytics(options.timeframe))
            .await?
            .map(ModuleData::Analytics),
        PageKey::AiManagement => load_with_fallback(page, api.ai_models())
            .await?
            .map(ModuleData::AiManagement),
        PageKey::Administration => load_admin(api).await.map(ModuleData::Administration),
    };
    Ok(loaded)
}

/// Administration gathers five endpoints; each part falls back on its own.
async fn load_admin(api: &AdminApi) -> Loaded<AdminData> {
    let (status, s0) = part(api.system_status().await, SystemStatus::default, |r| r.status);
    let (metrics, s1) = part(api.system_metrics().await, SystemMetrics::placeholder, |m| m);
    let (settings, s2) = part(api.system_settings().await, SystemSettings::placeholder, |s| s);
    let (logs, s3) = part(api.system_logs(None, None).await, placeholder_logs, |l| l);
    let (backups, s4) = part(api.backup_history().await, placeholder_backups, |b| b);

    Loaded {
        data: AdminData {
            status,
            metrics,
            settings,
            logs,
            backups,
        },
        source: s0.combine(s1).combine(s2).combine(s3).combine(s4),
    }
}

fn part<T, U>(
    envelope: Envelope<T>,
    placeholder: impl FnOnce() -> U,
    map: impl FnOnce(T) -> U,
) -> (U, DataSource) {
    match envelope.into_result() {
        Ok(data) => (map(data), DataSource::Remote),
        Err(reason) => {
            tracing::debug!(%reason, "administration part using placeholder");
            (placeholder(), DataSource::Placeholder)
        }
    }
}

// =============================================================================
// Fallback datasets
// =============================================================================

impl Fallback for DashboardData {
    fn placeholder() -> Option<Self> {
        Some(DashboardData::placeholder())
    }
}

impl Fallback for UserList {
    fn placeholder() -> Option<Self> {
        Some(UserList::placeholder())
    }
}

impl Fallback for CourseList {
    fn placeholder() -> Option<Self> {
        Some(CourseList::placeholder())
    }
}

impl Fallback for AnalyticsData {
    fn placeholder() -> Option<Self> {
        Some(AnalyticsData::placeholder())
    }
}

impl Fallback for AiData {
    fn placeholder() -> Option<Self> {
        Some(AiData::placeholder())
    }
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Course {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::core::gateway::{Gateway, Method, MockTransport};

    fn api(mock: MockTransport) -> AdminApi {
        AdminApi::new(Gateway::new(Arc::new(mock)).with_base_url("https://api.test"))
    }

    #[tokio::test]
    async fn test_every_page_falls_back_to_its_placeholder() {
        let api = api(MockTransport::new());
        for page in PageKey::ALL {
            let loaded = load(page, &api, LoadOptions::default()).await.unwrap();
            assert_eq!(loaded.source, DataSource::Placeholder, "{}", page.key());
            assert_eq!(loaded.data, ModuleData::placeholder(page), "{}", page.key());
            assert_eq!(loaded.data.page(), page);
        }
    }

    #[tokio::test]
    async fn test_remote_users_used() {
        let mock = MockTransport::new().ok(
            Method::Get,
            "/admin/users",
            json!([{
                "id": "u9",
                "name": "Lin",
                "email": "lin@x.io",
                "role": "Student",
                "status": "Active",
                "lastLogin": "2025-06-28T10:00:00Z",
                "joinDate": "2024-01-01"
            }]),
        );
        let loaded = load(PageKey::Users, &api(mock), LoadOptions::default())
            .await
            .unwrap();
        assert_eq!(loaded.source, DataSource::Remote);
        match loaded.data {
            ModuleData::Users(list) => assert_eq!(list.0[0].key(), "u9"),
            other => panic!("unexpected {:?}", other.page()),
        }
    }

    #[tokio::test]
    async fn test_analytics_uses_timeframe() {
        let mock = Arc::new(MockTransport::new());
        let api = AdminApi::new(Gateway::new(mock.clone()).with_base_url("https://api.test"));
        let options = LoadOptions {
            timeframe: Timeframe::Week,
        };
        load(PageKey::Analytics, &api, options).await.unwrap();
        assert!(mock.sent()[0].url.ends_with("/admin/analytics?range=7d"));
    }

    #[tokio::test]
    async fn test_admin_partial_fallback() {
        let mock = MockTransport::new()
            .ok(Method::Get, "/admin/system/status", json!({"status": "maintenance"}))
            .ok(Method::Get, "/admin/system/backups", json!([]));
        let loaded = load(PageKey::Administration, &api(mock), LoadOptions::default())
            .await
            .unwrap();
        assert!(loaded.source.is_placeholder());
        let ModuleData::Administration(admin) = loaded.data else {
            panic!("expected administration data");
        };
        assert_eq!(admin.status, SystemStatus::Maintenance);
        assert!(admin.backups.is_empty());
        assert_eq!(admin.settings, SystemSettings::placeholder());
        assert_eq!(admin.logs, placeholder_logs());
    }
}
