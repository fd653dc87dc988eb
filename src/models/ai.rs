//! AI model fleet: status, usage, monitoring and training jobs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelStatus {
    Active,
    Training,
    Inactive,
}

impl ModelStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Training => "Training",
            Self::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiModel {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub status: ModelStatus,
    pub accuracy: f64,
    /// Milliseconds.
    pub response_time: u32,
    /// Share of capacity in use, percent.
    pub usage: f64,
    pub last_updated: String,
    pub description: String,
    pub parameters: String,
    pub provider: String,
    pub cost_per_request: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPerformance {
    pub total_requests: u64,
    pub success_rate: f64,
    pub avg_response_time: u32,
    pub total_cost: f64,
    /// Month-over-month change, percent.
    pub cost_trend: f64,
    pub error_rate: f64,
    pub uptime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRequests {
    pub date: String,
    pub requests: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiUsage {
    pub daily: Vec<DailyRequests>,
    /// Model name to share of requests, percent.
    pub by_model: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub model: String,
    pub message: String,
    pub timestamp: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsibleAiMetrics {
    pub bias: f64,
    pub fairness: f64,
    pub explainability: f64,
    pub safety: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitoring {
    pub alerts: Vec<AiAlert>,
    pub metrics: ResponsibleAiMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveJob {
    pub id: String,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub progress: u8,
    pub eta: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedJob {
    pub id: String,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub completed_time: String,
    pub duration: String,
    pub improvement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub active_jobs: Vec<ActiveJob>,
    pub completed_jobs: Vec<CompletedJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiData {
    pub models: Vec<AiModel>,
    pub performance: AiPerformance,
    pub usage: AiUsage,
    pub monitoring: Monitoring,
    pub training: Training,
}

/// Tunable generation parameters sent to the model config endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AiStats {
    pub active_models: usize,
    pub average_accuracy: f64,
}

impl AiData {
    pub fn stats(&self) -> AiStats {
        let active_models = self
            .models
            .iter()
            .filter(|m| m.status == ModelStatus::Active)
            .count();
        let average_accuracy = if self.models.is_empty() {
            0.0
        } else {
            self.models.iter().map(|m| m.accuracy).sum::<f64>() / self.models.len() as f64
        };
        AiStats {
            active_models,
            average_accuracy,
        }
    }

    pub fn model(&self, id: &str) -> Option<&AiModel> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Remove an alert locally. Returns false when no alert had that id.
    pub fn dismiss_alert(&mut self, id: &str) -> bool {
        let before = self.monitoring.alerts.len();
        self.monitoring.alerts.retain(|a| a.id != id);
        self.monitoring.alerts.len() != before
    }

    pub fn peak_daily_requests(&self) -> u64 {
        self.usage.daily.iter().map(|d| d.requests).max().unwrap_or(0)
    }

    pub fn placeholder() -> Self {
        struct Seed<'a> {
            id: &'a str,
            name: &'a str,
            kind: &'a str,
            version: &'a str,
            status: ModelStatus,
            accuracy: f64,
            response_time: u32,
            usage: f64,
            last_updated: &'a str,
            description: &'a str,
            parameters: &'a str,
            provider: &'a str,
            cost_per_request: f64,
        }
        let model = |s: Seed<'_>| AiModel {
            id: s.id.to_string(),
            name: s.name.to_string(),
            kind: s.kind.to_string(),
            version: s.version.to_string(),
            status: s.status,
            accuracy: s.accuracy,
            response_time: s.response_time,
            usage: s.usage,
            last_updated: s.last_updated.to_string(),
            description: s.description.to_string(),
            parameters: s.parameters.to_string(),
            provider: s.provider.to_string(),
            cost_per_request: s.cost_per_request,
        };
        let daily = |date: &str, requests| DailyRequests {
            date: date.to_string(),
            requests,
        };
        let alert = |id: &str, kind: &str, model: &str, message: &str, timestamp: &str| AiAlert {
            id: id.to_string(),
            kind: kind.to_string(),
            model: model.to_string(),
            message: message.to_string(),
            timestamp: timestamp.to_string(),
            status: "active".to_string(),
        };

        Self {
            models: vec![
                model(Seed {
                    id: "model_001",
                    name: "AgenticLearn Tutor GPT",
                    kind: "Language Model",
                    version: "v2.1.3",
                    status: ModelStatus::Active,
                    accuracy: 94.7,
                    response_time: 245,
                    usage: 87.3,
                    last_updated: "2025-06-28T10:00:00Z",
                    description: "Primary AI tutor for personalized learning assistance",
                    parameters: "7B",
                    provider: "OpenAI",
                    cost_per_request: 0.002,
                }),
                model(Seed {
                    id: "model_002",
                    name: "Content Recommendation Engine",
                    kind: "Recommendation System",
                    version: "v1.8.2",
                    status: ModelStatus::Active,
                    accuracy: 91.2,
                    response_time: 156,
                    usage: 76.8,
                    last_updated: "2025-06-27T15:30:00Z",
                    description: "Personalized course and content recommendations",
                    parameters: "2B",
                    provider: "Custom",
                    cost_per_request: 0.001,
                }),
                model(Seed {
                    id: "model_003",
                    name: "Assessment Generator",
                    kind: "Content Generation",
                    version: "v1.5.1",
                    status: ModelStatus::Active,
                    accuracy: 89.4,
                    response_time: 312,
                    usage: 45.2,
                    last_updated: "2025-06-26T09:00:00Z",
                    description: "Automated quiz and assessment generation",
                    parameters: "3B",
                    provider: "Anthropic",
                    cost_per_request: 0.0015,
                }),
                model(Seed {
                    id: "model_004",
                    name: "Learning Path Optimizer",
                    kind: "Optimization",
                    version: "v2.0.1",
                    status: ModelStatus::Training,
                    accuracy: 86.1,
                    response_time: 423,
                    usage: 23.7,
                    last_updated: "2025-06-25T14:20:00Z",
                    description: "Optimizes learning paths based on student progress",
                    parameters: "1.5B",
                    provider: "Custom",
                    cost_per_request: 0.0008,
                }),
            ],
            performance: AiPerformance {
                total_requests: 1_247_893,
                success_rate: 99.2,
                avg_response_time: 234,
                total_cost: 2847.32,
                cost_trend: -12.3,
                error_rate: 0.8,
                uptime: 99.7,
            },
            usage: AiUsage {
                daily: vec![
                    daily("2025-06-22", 12450),
                    daily("2025-06-23", 13200),
                    daily("2025-06-24", 11800),
                    daily("2025-06-25", 14500),
                    daily("2025-06-26", 15200),
                    daily("2025-06-27", 13900),
                    daily("2025-06-28", 16100),
                ],
                by_model: [
                    ("AgenticLearn Tutor GPT", 45.2),
                    ("Content Recommendation Engine", 28.7),
                    ("Assessment Generator", 16.3),
                    ("Learning Path Optimizer", 9.8),
                ]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            },
            monitoring: Monitoring {
                alerts: vec![
                    alert(
                        "alert_001",
                        "warning",
                        "Learning Path Optimizer",
                        "Model accuracy below threshold (86.1%)",
                        "2025-06-28T09:30:00Z",
                    ),
                    alert(
                        "alert_002",
                        "info",
                        "Assessment Generator",
                        "Model update available (v1.5.2)",
                        "2025-06-27T16:45:00Z",
                    ),
                ],
                metrics: ResponsibleAiMetrics {
                    bias: 2.3,
                    fairness: 94.7,
                    explainability: 87.2,
                    safety: 98.1,
                },
            },
            training: Training {
                active_jobs: vec![ActiveJob {
                    id: "job_001".to_string(),
                    model: "Learning Path Optimizer".to_string(),
                    kind: "Fine-tuning".to_string(),
                    progress: 67,
                    eta: "2 hours".to_string(),
                    start_time: "2025-06-28T08:00:00Z".to_string(),
                }],
                completed_jobs: vec![CompletedJob {
                    id: "job_002".to_string(),
                    model: "Content Recommendation Engine".to_string(),
                    kind: "Retraining".to_string(),
                    completed_time: "2025-06-27T12:00:00Z".to_string(),
                    duration: "4.5 hours".to_string(),
                    improvement: "+2.3% accuracy".to_string(),
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats() {
        let data = AiData::placeholder();
        let stats = data.stats();
        assert_eq!(stats.active_models, 3);
        assert!((stats.average_accuracy - 90.35).abs() < 1e-9);
    }

    #[test]
    fn test_dismiss_alert() {
        let mut data = AiData::placeholder();
        assert!(data.dismiss_alert("alert_001"));
        assert!(!data.dismiss_alert("alert_001"));
        assert_eq!(data.monitoring.alerts.len(), 1);
        assert_eq!(data.monitoring.alerts[0].id, "alert_002");
    }

    #[test]
    fn test_lookup_and_peak() {
        let data = AiData::placeholder();
        assert_eq!(
            data.model("model_004").map(|m| m.status),
            Some(ModelStatus::Training)
        );
        assert!(data.model("model_999").is_none());
        assert_eq!(data.peak_daily_requests(), 16100);
    }

    #[test]
    fn test_model_config_wire_shape() {
        let json = serde_json::to_value(ModelConfig {
            temperature: 0.2,
            max_tokens: 512,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"temperature": 0.2, "maxTokens": 512}));
    }
}
