//! Typed backend API.
//!
//! One method per backend capability. Each is a thin wrapper that builds a
//! [`Call`] and decodes the envelope payload; none of them can fail outside
//! the envelope.

use serde::Serialize;
use serde_json::Value;

use crate::config::{DEFAULT_LOG_LIMIT, endpoints};
use crate::core::gateway::{Call, Envelope, Gateway, MultipartField, UploadFile};
use crate::models::{
    AdminProfile, AiData, AnalyticsData, BackupReceipt, BackupRecord, Course, CourseDraft,
    CourseList, DashboardData, ExportFormat, ExportKind, ExportReceipt, LogEntry, LogLevel,
    ModelConfig, RealtimeStats, ReportKind, StatusReport, SystemMetrics, SystemSettings,
    Timeframe, UploadReceipt, User, UserDraft, UserList,
};
use crate::utils::QueryString;

/// Pagination for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            limit: crate::config::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Body of a report generation request.
#[derive(Debug, Clone, Serialize)]
struct ReportRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    timeframe: &'a str,
    format: &'a str,
}

#[derive(Clone)]
pub struct AdminApi {
    gateway: Gateway,
}

impl AdminApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    // -------------------------------------------------------------------------
    // Profile & system
    // -------------------------------------------------------------------------

    pub async fn admin_profile(&self) -> Envelope<AdminProfile> {
        self.gateway.issue_as(Call::get(endpoints::PROFILE)).await
    }

    pub async fn system_status(&self) -> Envelope<StatusReport> {
        self.gateway.issue_as(Call::get(endpoints::SYSTEM_STATUS)).await
    }

    pub async fn system_metrics(&self) -> Envelope<SystemMetrics> {
        self.gateway.issue_as(Call::get(endpoints::SYSTEM_METRICS)).await
    }

    // -------------------------------------------------------------------------
    // Dashboard
    // -------------------------------------------------------------------------

    pub async fn dashboard(&self) -> Envelope<DashboardData> {
        self.gateway.issue_as(Call::get(endpoints::DASHBOARD)).await
    }

    pub async fn realtime_stats(&self) -> Envelope<RealtimeStats> {
        self.gateway
            .issue_as(Call::get(endpoints::DASHBOARD_REALTIME))
            .await
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    pub async fn users(&self, page: Page, filters: &[(&str, &str)]) -> Envelope<UserList> {
        let path = QueryString::new()
            .push("page", page.page)
            .push("limit", page.limit)
            .extend(filters.iter().copied())
            .append_to(endpoints::USERS);
        self.gateway.issue_as(Call::get(path)).await
    }

    pub async fn user(&self, id: &str) -> Envelope<User> {
        self.gateway.issue_as(Call::get(user_path(id))).await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> Envelope<User> {
        self.gateway
            .issue_as(Call::post(endpoints::USERS).json(draft))
            .await
    }

    pub async fn update_user(&self, id: &str, draft: &UserDraft) -> Envelope<User> {
        self.gateway
            .issue_as(Call::put(user_path(id)).json(draft))
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Envelope<Value> {
        self.gateway.issue(Call::delete(user_path(id))).await
    }

    // -------------------------------------------------------------------------
    // Courses
    // -------------------------------------------------------------------------

    pub async fn courses(&self, filters: &[(&str, &str)]) -> Envelope<CourseList> {
        let path = QueryString::new()
            .extend(filters.iter().copied())
            .append_to(endpoints::COURSES);
        self.gateway.issue_as(Call::get(path)).await
    }

    pub async fn course(&self, id: &str) -> Envelope<Course> {
        self.gateway.issue_as(Call::get(course_path(id))).await
    }

    pub async fn create_course(&self, draft: &CourseDraft) -> Envelope<Course> {
        self.gateway
            .issue_as(Call::post(endpoints::COURSES).json(draft))
            .await
    }

    pub async fn update_course(&self, id: &str, draft: &CourseDraft) -> Envelope<Course> {
        self.gateway
            .issue_as(Call::put(course_path(id)).json(draft))
            .await
    }

    pub async fn delete_course(&self, id: &str) -> Envelope<Value> {
        self.gateway.issue(Call::delete(course_path(id))).await
    }

    // -------------------------------------------------------------------------
    // Analytics & reports
    // -------------------------------------------------------------------------

    pub async fn analytics(&self, timeframe: Timeframe) -> Envelope<AnalyticsData> {
        let path = QueryString::new()
            .push("range", timeframe.as_str())
            .append_to(endpoints::ANALYTICS);
        self.gateway.issue_as(Call::get(path)).await
    }

    pub async fn generate_report(
        &self,
        kind: ReportKind,
        timeframe: Timeframe,
        format: ExportFormat,
    ) -> Envelope<ExportReceipt> {
        let body = ReportRequest {
            kind: kind.as_str(),
            timeframe: timeframe.as_str(),
            format: format.as_str(),
        };
        self.gateway
            .issue_as(Call::post(endpoints::REPORTS).json(&body))
            .await
    }

    pub async fn export(
        &self,
        kind: ExportKind,
        format: ExportFormat,
        filters: &[(&str, &str)],
    ) -> Envelope<ExportReceipt> {
        let path = QueryString::new()
            .push("format", format.as_str())
            .extend(filters.iter().copied())
            .append_to(&format!("{}/{}", endpoints::EXPORT, kind.as_str()));
        self.gateway.issue_as(Call::get(path)).await
    }

    // -------------------------------------------------------------------------
    // AI management
    // -------------------------------------------------------------------------

    pub async fn ai_models(&self) -> Envelope<AiData> {
        self.gateway.issue_as(Call::get(endpoints::AI_MODELS)).await
    }

    pub async fn update_model_config(&self, model_id: &str, config: &ModelConfig) -> Envelope<Value> {
        let path = format!(
            "{}/{}/config",
            endpoints::AI_MODELS,
            crate::utils::encode_component(model_id)
        );
        self.gateway.issue(Call::put(path).json(config)).await
    }

    // -------------------------------------------------------------------------
    // Administration
    // -------------------------------------------------------------------------

    /// Log lines at `level` or above; `None` asks for all levels.
    pub async fn system_logs(&self, level: Option<LogLevel>, limit: Option<u32>) -> Envelope<Vec<LogEntry>> {
        let path = QueryString::new()
            .push("level", level.map_or("all", LogLevel::as_str))
            .push("limit", limit.unwrap_or(DEFAULT_LOG_LIMIT))
            .append_to(endpoints::SYSTEM_LOGS);
        self.gateway.issue_as(Call::get(path)).await
    }

    pub async fn run_backup(&self) -> Envelope<BackupReceipt> {
        self.gateway
            .issue_as(Call::post(endpoints::SYSTEM_BACKUP))
            .await
    }

    pub async fn backup_history(&self) -> Envelope<Vec<BackupRecord>> {
        self.gateway
            .issue_as(Call::get(endpoints::SYSTEM_BACKUPS))
            .await
    }

    pub async fn system_settings(&self) -> Envelope<SystemSettings> {
        self.gateway
            .issue_as(Call::get(endpoints::SYSTEM_SETTINGS))
            .await
    }

    pub async fn update_settings(&self, settings: &SystemSettings) -> Envelope<SystemSettings> {
        self.gateway
            .issue_as(Call::put(endpoints::SYSTEM_SETTINGS).json(settings))
            .await
    }

    /// Multipart upload with fields `file` and `type`.
    pub async fn upload(&self, file: UploadFile, kind: &str) -> Envelope<UploadReceipt> {
        let call = Call::post(endpoints::UPLOAD).multipart(vec![
            MultipartField::File {
                name: "file".to_string(),
                file,
            },
            MultipartField::Text {
                name: "type".to_string(),
                value: kind.to_string(),
            },
        ]);
        self.gateway.issue_as(call).await
    }
}

fn user_path(id: &str) -> String {
    format!("{}/{}", endpoints::USERS, crate::utils::encode_component(id))
}

fn course_path(id: &str) -> String {
    format!("{}/{}", endpoints::COURSES, crate::utils::encode_component(id))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::core::gateway::{Method, MockTransport, RequestBody};

    fn api(mock: MockTransport) -> (AdminApi, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let gw = Gateway::new(mock.clone()).with_base_url("https://api.test");
        (AdminApi::new(gw), mock)
    }

    #[tokio::test]
    async fn test_users_query_and_decode() {
        let users = serde_json::to_value(UserList::placeholder()).unwrap();
        let (api, mock) = api(MockTransport::new().ok(Method::Get, "/admin/users", users));

        let env = api
            .users(Page::default(), &[("role", "Student"), ("q", "a&b")])
            .await;
        assert_eq!(env.into_result().map(|l| l.0.len()), Ok(8));

        let sent = mock.sent();
        assert_eq!(
            sent[0].url,
            "https://api.test/admin/users?page=1&limit=20&role=Student&q=a%26b"
        );
    }

    #[tokio::test]
    async fn test_mutation_paths_and_bodies() {
        let user = serde_json::to_value(&UserList::placeholder().0[0]).unwrap();
        let (api, mock) = api(
            MockTransport::new()
                .ok(Method::Put, "/admin/users/user_001", user)
                .ok(Method::Delete, "/admin/courses/course_006", json!({})),
        );
        let draft = UserDraft::from_user(&UserList::placeholder().0[0]);
        assert!(api.update_user("user_001", &draft).await.success);
        assert!(api.delete_course("course_006").await.success);

        let sent = mock.sent();
        assert_eq!(sent[0].method, Method::Put);
        match &sent[0].body {
            Some(RequestBody::Json(body)) => assert_eq!(body["email"], "sarah.johnson@email.com"),
            other => panic!("unexpected body {:?}", other),
        }
        assert_eq!(sent[1].method, Method::Delete);
        assert!(sent[1].url.ends_with("/admin/courses/course_006"));
    }

    #[tokio::test]
    async fn test_export_and_report() {
        let (api, mock) = api(
            MockTransport::new()
                .ok(
                    Method::Get,
                    "/admin/export/users",
                    json!({ "downloadUrl": "https://files.test/users.csv" }),
                )
                .ok(Method::Post, "/admin/reports", json!({ "reportId": "r1" })),
        );

        let receipt = api
            .export(ExportKind::Users, ExportFormat::Csv, &[("status", "Active")])
            .await
            .into_result();
        assert_eq!(
            receipt.map(|r| r.download_url),
            Ok(Some("https://files.test/users.csv".to_string()))
        );

        let report = api
            .generate_report(ReportKind::Comprehensive, Timeframe::Week, ExportFormat::Pdf)
            .await;
        assert!(report.success);

        let sent = mock.sent();
        assert!(sent[0].url.ends_with("/admin/export/users?format=csv&status=Active"));
        assert_eq!(
            sent[1].body,
            Some(RequestBody::Json(
                json!({ "type": "comprehensive", "timeframe": "7d", "format": "pdf" })
            ))
        );
    }

    #[tokio::test]
    async fn test_logs_query_defaults() {
        let (api, mock) = api(MockTransport::new().ok(Method::Get, "/admin/system/logs", json!([])));
        let env = api.system_logs(None, None).await;
        assert_eq!(env.into_result(), Ok(vec![]));

        let _ = api.system_logs(Some(LogLevel::Warn), Some(5)).await;
        let sent = mock.sent();
        assert!(sent[0].url.ends_with("/admin/system/logs?level=all&limit=100"));
        assert!(sent[1].url.ends_with("/admin/system/logs?level=warn&limit=5"));
    }

    #[tokio::test]
    async fn test_upload_is_multipart() {
        let (api, mock) = api(MockTransport::new().ok(
            Method::Post,
            "/admin/upload",
            json!({ "url": "https://files.test/a.txt" }),
        ));
        let file = UploadFile {
            name: "a.txt".into(),
            mime: "text/plain".into(),
            bytes: b"hello".to_vec(),
        };
        let env = api.upload(file.clone(), "general").await;
        assert!(env.success);

        let sent = mock.sent();
        assert_eq!(sent[0].header("Content-Type"), None);
        assert_eq!(
            sent[0].body,
            Some(RequestBody::Multipart(vec![
                MultipartField::File {
                    name: "file".into(),
                    file
                },
                MultipartField::Text {
                    name: "type".into(),
                    value: "general".into()
                },
            ]))
        );
    }

    #[tokio::test]
    async fn test_analytics_range_and_model_config() {
        let (api, mock) = api(
            MockTransport::new()
                .ok(
                    Method::Get,
                    "/admin/analytics",
                    serde_json::to_value(AnalyticsData::placeholder()).unwrap(),
                )
                .ok(Method::Put, "/admin/ai/models/model_001/config", json!({})),
        );
        assert!(api.analytics(Timeframe::Year).await.success);
        assert!(
            api.update_model_config("model_001", &ModelConfig::default())
                .await
                .success
        );

        let sent = mock.sent();
        assert!(sent[0].url.ends_with("/admin/analytics?range=1y"));
        assert_eq!(
            sent[1].body,
            Some(RequestBody::Json(json!({ "temperature": 0.7, "maxTokens": 1024 })))
        );
    }
}
