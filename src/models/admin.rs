//! System administration: metrics, settings, logs and backups.

use serde::{Deserialize, Serialize};

use super::session::SystemStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub cpu: f64,
    pub memory: f64,
    pub storage: f64,
    pub network: f64,
    /// Percent.
    pub uptime: f64,
    pub active_connections: u64,
    #[serde(default)]
    pub version: String,
}

impl SystemMetrics {
    pub fn gauges(&self) -> [(&'static str, f64); 4] {
        [
            ("CPU", self.cpu),
            ("Memory", self.memory),
            ("Storage", self.storage),
            ("Network", self.network),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub site_name: String,
    pub support_email: String,
    pub maintenance_mode: bool,
    pub allow_registration: bool,
    pub session_timeout_minutes: u32,
    pub max_upload_mb: u32,
    pub default_language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [Self::Error, Self::Warn, Self::Info, Self::Debug];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub source: String,
    pub message: String,
}

/// Keep entries at `level` or more severe; `None` keeps everything.
pub fn filter_logs(logs: &[LogEntry], level: Option<LogLevel>) -> Vec<&LogEntry> {
    logs.iter()
        .filter(|entry| level.is_none_or(|min| entry.level >= min))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    pub id: String,
    pub created_at: String,
    /// Bytes.
    pub size: u64,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Payload of a successful backup request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupReceipt {
    #[serde(default)]
    pub backup_id: Option<String>,
}

/// Payload of a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
}

/// Everything the administration screen shows, gathered from several endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminData {
    pub status: SystemStatus,
    pub metrics: SystemMetrics,
    pub settings: SystemSettings,
    pub logs: Vec<LogEntry>,
    pub backups: Vec<BackupRecord>,
}

impl SystemMetrics {
    pub fn placeholder() -> Self {
        Self {
            cpu: 45.0,
            memory: 67.0,
            storage: 23.0,
            network: 89.0,
            uptime: 99.8,
            active_connections: 1523,
            version: crate::config::APP_VERSION.to_string(),
        }
    }
}

impl SystemSettings {
    pub fn placeholder() -> Self {
        Self {
            site_name: "AgenticLearn".to_string(),
            support_email: "support@agenticlearn.com".to_string(),
            maintenance_mode: false,
            allow_registration: true,
            session_timeout_minutes: 60,
            max_upload_mb: 50,
            default_language: "English".to_string(),
        }
    }
}

pub fn placeholder_logs() -> Vec<LogEntry> {
    let entry = |timestamp: &str, level, source: &str, message: &str| LogEntry {
        timestamp: timestamp.to_string(),
        level,
        source: source.to_string(),
        message: message.to_string(),
    };
    vec![
        entry(
            "2025-06-28T11:02:00Z",
            LogLevel::Info,
            "auth",
            "Administrator signed in",
        ),
        entry(
            "2025-06-28T10:50:00Z",
            LogLevel::Warn,
            "system",
            "Memory usage above 65%",
        ),
        entry(
            "2025-06-28T10:45:00Z",
            LogLevel::Info,
            "backup",
            "Automated system backup completed",
        ),
        entry(
            "2025-06-28T10:12:00Z",
            LogLevel::Error,
            "ai",
            "Learning Path Optimizer request timed out",
        ),
        entry(
            "2025-06-28T09:30:00Z",
            LogLevel::Debug,
            "scheduler",
            "Nightly maintenance window registered for 02:00",
        ),
    ]
}

pub fn placeholder_backups() -> Vec<BackupRecord> {
    let backup = |id: &str, created_at: &str, size, kind: &str| BackupRecord {
        id: id.to_string(),
        created_at: created_at.to_string(),
        size,
        status: "completed".to_string(),
        kind: kind.to_string(),
    };
    vec![
        backup("backup_003", "2025-06-28T10:45:00Z", 1_288_490_189, "automatic"),
        backup("backup_002", "2025-06-27T10:45:00Z", 1_275_068_416, "automatic"),
        backup("backup_001", "2025-06-26T18:20:00Z", 1_261_646_643, "manual"),
    ]
}

impl AdminData {
    pub fn placeholder() -> Self {
        Self {
            status: SystemStatus::Operational,
            metrics: SystemMetrics::placeholder(),
            settings: SystemSettings::placeholder(),
            logs: placeholder_logs(),
            backups: placeholder_backups(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_by_severity() {
        let logs = placeholder_logs();
        assert_eq!(filter_logs(&logs, None).len(), 5);
        assert_eq!(filter_logs(&logs, Some(LogLevel::Warn)).len(), 2);
        assert_eq!(filter_logs(&logs, Some(LogLevel::Error)).len(), 1);
        assert_eq!(filter_logs(&logs, Some(LogLevel::Debug)).len(), 5);
    }

    #[test]
    fn test_settings_wire_shape() {
        let json = serde_json::to_value(SystemSettings::placeholder()).unwrap();
        assert_eq!(json["sessionTimeoutMinutes"], 60);
        assert_eq!(json["maintenanceMode"], false);
    }

    #[test]
    fn test_backups_newest_first() {
        let backups = placeholder_backups();
        assert!(backups[0].created_at > backups[1].created_at);
    }
}
