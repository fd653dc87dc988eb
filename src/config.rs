//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Product name shown in the sidebar and boot screen.
pub const APP_NAME: &str = "AgenticLearn Admin";

/// Application version.
pub const APP_VERSION: &str = "0.1.0";

// =============================================================================
// Network Configuration
// =============================================================================

/// Base URL every backend endpoint is appended to.
pub const API_BASE_URL: &str = "https://asia-southeast2-agenticai-462517.cloudfunctions.net/domyid";

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Backend endpoint paths (relative to [`API_BASE_URL`]).
pub mod endpoints {
    pub const PROFILE: &str = "/admin/profile";
    pub const SYSTEM_STATUS: &str = "/admin/system/status";
    pub const SYSTEM_METRICS: &str = "/admin/system/metrics";
    pub const SYSTEM_LOGS: &str = "/admin/system/logs";
    pub const SYSTEM_BACKUP: &str = "/admin/system/backup";
    pub const SYSTEM_BACKUPS: &str = "/admin/system/backups";
    pub const SYSTEM_SETTINGS: &str = "/admin/system/settings";
    pub const DASHBOARD: &str = "/admin/dashboard";
    pub const DASHBOARD_REALTIME: &str = "/admin/dashboard/realtime";
    pub const USERS: &str = "/admin/users";
    pub const COURSES: &str = "/admin/courses";
    pub const ANALYTICS: &str = "/admin/analytics";
    pub const AI_MODELS: &str = "/admin/ai/models";
    pub const UPLOAD: &str = "/admin/upload";
    pub const EXPORT: &str = "/admin/export";
    pub const REPORTS: &str = "/admin/reports";
}

/// Default page size for paginated list endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default number of log lines requested by the administration screen.
pub const DEFAULT_LOG_LIMIT: u32 = 100;

// =============================================================================
// Session Fallback
// =============================================================================

/// Values substituted when the profile or status endpoints are unreachable.
pub mod fallback_session {
    pub const ADMIN_NAME: &str = "System Administrator";
    pub const ADMIN_EMAIL: &str = "admin@agenticlearn.com";
    pub const ADMIN_ROLE: &str = "Super Admin";
    pub const ADMIN_AVATAR: &str = "A";
    pub const ADMIN_PERMISSIONS: &[&str] = &["all"];
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Media query matching the mobile layout: at or below 768px the sidebar
/// becomes an overlay.
pub const MOBILE_MEDIA_QUERY: &str = "(max-width: 768px)";

/// Default notification lifetime in milliseconds.
pub const NOTIFICATION_TTL_MS: i64 = 5000;

/// Element id of the injected notification stylesheet.
pub const NOTIFICATION_STYLE_ID: &str = "notification-styles";

// =============================================================================
// Live Refresh
// =============================================================================

/// Dashboard live-refresh interval in milliseconds.
pub const REALTIME_REFRESH_MS: u32 = 30_000;

/// Number of realtime samples kept for the dashboard trend strip.
pub const REALTIME_SAMPLE_CAPACITY: usize = 20;
