//! Export and report request parameters.

use serde::{Deserialize, Serialize};

/// File format requested from the export and report endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Pdf, Self::Excel, Self::Csv];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Pdf => "pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Excel => "Excel",
            Self::Pdf => "PDF",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

/// Dataset an export covers. Becomes the last path segment of the export URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Dashboard,
    Users,
    Courses,
    Analytics,
    Performance,
    AiModels,
}

impl ExportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Courses => "courses",
            Self::Analytics => "analytics",
            Self::Performance => "performance",
            Self::AiModels => "ai-models",
        }
    }
}

/// Success payload of an export or report request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub report_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_without_url() {
        let receipt: ExportReceipt = serde_json::from_str("{}").unwrap();
        assert_eq!(receipt.download_url, None);

        let receipt: ExportReceipt =
            serde_json::from_str(r#"{"downloadUrl":"https://files/x.csv"}"#).unwrap();
        assert_eq!(receipt.download_url.as_deref(), Some("https://files/x.csv"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ExportFormat::parse("excel"), Some(ExportFormat::Excel));
        assert_eq!(ExportFormat::parse("xlsx"), None);
    }
}
