//! Dashboard overview payload.

use serde::{Deserialize, Serialize};

use super::session::SystemStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub overview: Overview,
    pub trends: Trends,
    pub recent_activity: Vec<Activity>,
    pub system_health: SystemHealth,
    pub top_courses: Vec<TopCourse>,
    pub alerts: Vec<DashboardAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_users: u64,
    pub active_users: u64,
    pub total_courses: u64,
    pub active_courses: u64,
    pub total_assignments: u64,
    pub completed_assignments: u64,
    pub system_uptime: String,
    pub carbon_footprint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub value: String,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn new(value: impl Into<String>, direction: TrendDirection) -> Self {
        Self {
            value: value.into(),
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub user_growth: Trend,
    pub engagement: Trend,
    pub performance: Trend,
    pub efficiency: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthReading {
    pub value: u8,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub cpu: HealthReading,
    pub memory: HealthReading,
    pub storage: HealthReading,
    pub network: HealthReading,
}

impl SystemHealth {
    /// Readings in display order with their labels.
    pub fn readings(&self) -> [(&'static str, HealthReading); 4] {
        [
            ("CPU", self.cpu),
            ("MEMORY", self.memory),
            ("STORAGE", self.storage),
            ("NETWORK", self.network),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCourse {
    pub name: String,
    pub students: u64,
    pub completion: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAlert {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub timestamp: String,
}

/// Payload of the realtime endpoint polled by the live refresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeStats {
    #[serde(default)]
    pub active_users: Option<u64>,
    #[serde(default)]
    pub system_status: Option<SystemStatus>,
}

impl DashboardData {
    /// Fold a realtime sample into the overview.
    pub fn apply_realtime(&mut self, stats: &RealtimeStats) {
        if let Some(active) = stats.active_users {
            self.overview.active_users = active;
        }
    }

    pub fn placeholder() -> Self {
        let activity = |kind: &str, message: &str, timestamp: &str, icon: &str| Activity {
            kind: kind.to_string(),
            message: message.to_string(),
            timestamp: timestamp.to_string(),
            icon: icon.to_string(),
        };
        let course = |name: &str, students, completion| TopCourse {
            name: name.to_string(),
            students,
            completion,
        };

        Self {
            overview: Overview {
                total_users: 2847,
                active_users: 1523,
                total_courses: 156,
                active_courses: 89,
                total_assignments: 1247,
                completed_assignments: 8934,
                system_uptime: "99.8%".to_string(),
                carbon_footprint: "0.245g CO2".to_string(),
            },
            trends: Trends {
                user_growth: Trend::new("+12.5%", TrendDirection::Up),
                engagement: Trend::new("+8.3%", TrendDirection::Up),
                performance: Trend::new("+5.1%", TrendDirection::Up),
                efficiency: Trend::new("+15.2%", TrendDirection::Up),
            },
            recent_activity: vec![
                activity(
                    "user_registration",
                    "New student registered: Sarah Johnson",
                    "2 minutes ago",
                    "👤",
                ),
                activity(
                    "course_completion",
                    "Course completed: JavaScript Fundamentals",
                    "5 minutes ago",
                    "🎓",
                ),
                activity(
                    "system_backup",
                    "Automated system backup completed",
                    "15 minutes ago",
                    "💾",
                ),
                activity(
                    "ai_interaction",
                    "AI tutor session: 45 interactions",
                    "23 minutes ago",
                    "🤖",
                ),
                activity(
                    "assignment_submission",
                    "12 new assignment submissions",
                    "1 hour ago",
                    "📝",
                ),
            ],
            system_health: SystemHealth {
                cpu: HealthReading {
                    value: 45,
                    status: HealthStatus::Good,
                },
                memory: HealthReading {
                    value: 67,
                    status: HealthStatus::Warning,
                },
                storage: HealthReading {
                    value: 23,
                    status: HealthStatus::Good,
                },
                network: HealthReading {
                    value: 89,
                    status: HealthStatus::Excellent,
                },
            },
            top_courses: vec![
                course("JavaScript Fundamentals", 234, 87),
                course("Digital Literacy Basics", 189, 92),
                course("Green Computing Principles", 156, 78),
                course("Web Development Intro", 145, 83),
                course("AI Ethics & Safety", 123, 95),
            ],
            alerts: vec![
                DashboardAlert {
                    kind: "warning".to_string(),
                    title: "High Memory Usage".to_string(),
                    message: "System memory usage is at 67%. Consider optimization.".to_string(),
                    timestamp: "10 minutes ago".to_string(),
                },
                DashboardAlert {
                    kind: "info".to_string(),
                    title: "Scheduled Maintenance".to_string(),
                    message: "System maintenance scheduled for tonight at 2 AM.".to_string(),
                    timestamp: "2 hours ago".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_round_trips_as_backend_json() {
        let data = DashboardData::placeholder();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["overview"]["totalUsers"], 2847);
        assert_eq!(json["recentActivity"][0]["type"], "user_registration");
        let back: DashboardData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_apply_realtime() {
        let mut data = DashboardData::placeholder();
        data.apply_realtime(&RealtimeStats {
            active_users: Some(1600),
            system_status: None,
        });
        assert_eq!(data.overview.active_users, 1600);

        data.apply_realtime(&RealtimeStats::default());
        assert_eq!(data.overview.active_users, 1600);
    }
}
