//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`AdminProfile`], [`SystemStatus`] - Signed-in session
//! - [`DashboardData`], [`UserList`], [`CourseList`], [`AnalyticsData`],
//!   [`AiData`], [`AdminData`] - One payload per screen, each with a placeholder
//! - [`ViewState`], [`SubView`] - Per-module sub-view selection
//! - [`ExportFormat`], [`ExportKind`] - Export and report parameters

mod admin;
mod ai;
mod analytics;
mod courses;
mod dashboard;
mod export;
mod session;
mod users;
mod view;

pub use admin::{
    AdminData, BackupReceipt, BackupRecord, LogEntry, LogLevel, SystemMetrics, SystemSettings,
    UploadReceipt, filter_logs, placeholder_backups, placeholder_logs,
};
pub use ai::{AiData, AiModel, AiStats, ModelConfig, ModelStatus};
pub use analytics::{AnalyticsData, DailyCount, ReportKind, Timeframe, humanize_key, trend_peak};
pub use courses::{
    Course, CourseDraft, CourseFilter, CourseLevel, CourseList, CourseStats, CourseStatus,
    categories,
};
pub use dashboard::{DashboardData, HealthStatus, RealtimeStats, TrendDirection};
pub use export::{ExportFormat, ExportKind, ExportReceipt};
pub use session::{AdminProfile, StatusReport, SystemStatus};
pub use users::{User, UserDraft, UserFilter, UserList, UserRole, UserStats, UserStatus};
pub use view::{AdminView, AiView, AnalyticsView, ListView, SubView, ViewState};
