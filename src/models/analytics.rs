//! Analytics payload for one timeframe.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Window the analytics endpoint aggregates over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Self::Week, Self::Month, Self::Quarter, Self::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "1y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
            Self::Quarter => "Last 90 days",
            Self::Year => "Last year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Report types offered by the custom report form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    UserAnalytics,
    CoursePerformance,
    SystemPerformance,
    LearningAnalytics,
    Comprehensive,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        Self::UserAnalytics,
        Self::CoursePerformance,
        Self::SystemPerformance,
        Self::LearningAnalytics,
        Self::Comprehensive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserAnalytics => "user-analytics",
            Self::CoursePerformance => "course-performance",
            Self::SystemPerformance => "system-performance",
            Self::LearningAnalytics => "learning-analytics",
            Self::Comprehensive => "comprehensive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UserAnalytics => "User Analytics",
            Self::CoursePerformance => "Course Performance",
            Self::SystemPerformance => "System Performance",
            Self::LearningAnalytics => "Learning Analytics",
            Self::Comprehensive => "Comprehensive Report",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub overview: AnalyticsOverview,
    pub user_analytics: UserAnalytics,
    pub course_analytics: CourseAnalytics,
    pub performance_metrics: PerformanceMetrics,
    pub learning_analytics: LearningAnalytics,
    pub reports: Reports,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_users: u64,
    pub active_users: u64,
    pub new_users: u64,
    pub user_growth: f64,
    pub total_courses: u64,
    pub active_courses: u64,
    pub course_completions: u64,
    pub avg_completion_rate: f64,
    pub total_revenue: f64,
    /// kg CO2
    pub carbon_saved: f64,
    pub system_uptime: f64,
    /// minutes
    pub avg_session_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    #[serde(alias = "enrollments")]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersByRole {
    pub students: u64,
    pub educators: u64,
    pub administrators: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationShare {
    pub country: String,
    pub users: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub daily_active_users: u64,
    pub weekly_active_users: u64,
    pub monthly_active_users: u64,
    pub avg_sessions_per_user: f64,
    pub avg_time_per_session: f64,
    pub bounce_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    pub registration_trend: Vec<DailyCount>,
    pub users_by_role: UsersByRole,
    pub users_by_location: Vec<LocationShare>,
    pub engagement_metrics: EngagementMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularCourse {
    pub title: String,
    pub enrollments: u64,
    pub completions: u64,
    pub completion_rate: f64,
    pub avg_rating: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub category: String,
    pub courses: u64,
    pub students: u64,
    pub avg_completion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAnalytics {
    pub popular_courses: Vec<PopularCourse>,
    pub category_performance: Vec<CategoryPerformance>,
    pub enrollment_trend: Vec<DailyCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub current: f64,
    pub avg: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceHealth {
    pub cpu: ResourceUsage,
    pub memory: ResourceUsage,
    pub storage: ResourceUsage,
    pub network: ResourceUsage,
}

impl ResourceHealth {
    pub fn rows(&self) -> [(&'static str, ResourceUsage); 4] {
        [
            ("CPU", self.cpu),
            ("Memory", self.memory),
            ("Storage", self.storage),
            ("Network", self.network),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTime {
    pub avg: f64,
    pub p95: f64,
    pub p99: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRates {
    pub total: f64,
    pub api: f64,
    pub frontend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonFootprint {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub saved_vs_traditional: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub system_health: ResourceHealth,
    pub response_time: ResponseTime,
    pub error_rates: ErrorRates,
    pub carbon_footprint: CarbonFootprint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionByLevel {
    pub beginner: f64,
    pub intermediate: f64,
    pub advanced: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionByDuration {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRates {
    pub overall: f64,
    pub by_level: CompletionByLevel,
    pub by_duration: CompletionByDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub path: String,
    pub students: u64,
    pub completion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningAnalytics {
    pub completion_rates: CompletionRates,
    pub learning_paths: Vec<LearningPath>,
    /// Skill key (camelCase) to average progress percentage.
    pub skill_progress: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub generated_date: String,
    pub format: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reports {
    pub generated: Vec<GeneratedReport>,
}

/// Turn a camelCase key into a spaced, capitalised label.
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Largest count in a trend, used to scale bar heights.
pub fn trend_peak(points: &[DailyCount]) -> u64 {
    points.iter().map(|p| p.count).max().unwrap_or(0)
}

impl AnalyticsData {
    pub fn placeholder() -> Self {
        let trend = |counts: &[u64]| {
            counts
                .iter()
                .enumerate()
                .map(|(i, &count)| DailyCount {
                    date: format!("2025-06-{:02}", i + 1),
                    count,
                })
                .collect::<Vec<_>>()
        };
        let location = |country: &str, users, percentage| LocationShare {
            country: country.to_string(),
            users,
            percentage,
        };
        let popular = |title: &str, enrollments, completions, completion_rate, avg_rating| {
            PopularCourse {
                title: title.to_string(),
                enrollments,
                completions,
                completion_rate,
                avg_rating,
                revenue: 0.0,
            }
        };
        let category = |category: &str, courses, students, avg_completion| CategoryPerformance {
            category: category.to_string(),
            courses,
            students,
            avg_completion,
        };
        let usage = |current, avg, max| ResourceUsage { current, avg, max };
        let path = |path: &str, students, completion| LearningPath {
            path: path.to_string(),
            students,
            completion,
        };
        let report = |id: &str, title: &str, kind: &str, date: &str, format: &str, size: &str| {
            GeneratedReport {
                id: id.to_string(),
                title: title.to_string(),
                kind: kind.to_string(),
                generated_date: date.to_string(),
                format: format.to_string(),
                size: size.to_string(),
            }
        };

        Self {
            overview: AnalyticsOverview {
                total_users: 2847,
                active_users: 1523,
                new_users: 234,
                user_growth: 12.5,
                total_courses: 156,
                active_courses: 89,
                course_completions: 1247,
                avg_completion_rate: 84.3,
                total_revenue: 0.0,
                carbon_saved: 245.7,
                system_uptime: 99.8,
                avg_session_time: 42.5,
            },
            user_analytics: UserAnalytics {
                registration_trend: trend(&[45, 52, 38, 67, 71, 43, 59, 84, 76, 92]),
                users_by_role: UsersByRole {
                    students: 2456,
                    educators: 234,
                    administrators: 12,
                },
                users_by_location: vec![
                    location("United States", 856, 30.1),
                    location("United Kingdom", 423, 14.9),
                    location("Canada", 312, 11.0),
                    location("Australia", 267, 9.4),
                    location("Germany", 234, 8.2),
                    location("Others", 755, 26.4),
                ],
                engagement_metrics: EngagementMetrics {
                    daily_active_users: 1523,
                    weekly_active_users: 2134,
                    monthly_active_users: 2847,
                    avg_sessions_per_user: 3.2,
                    avg_time_per_session: 42.5,
                    bounce_rate: 23.4,
                },
            },
            course_analytics: CourseAnalytics {
                popular_courses: vec![
                    popular("JavaScript Fundamentals", 234, 203, 86.8, 4.8),
                    popular("Digital Literacy Basics", 189, 174, 92.1, 4.9),
                    popular("Green Computing Principles", 156, 122, 78.2, 4.7),
                    popular("Web Development Introduction", 145, 120, 82.8, 4.6),
                    popular("AI Ethics & Safety", 123, 117, 95.1, 4.9),
                ],
                category_performance: vec![
                    category("Programming", 45, 1234, 84.2),
                    category("Digital Literacy", 32, 987, 91.5),
                    category("Sustainability", 28, 654, 78.9),
                    category("Web Development", 25, 543, 82.1),
                    category("AI & Ethics", 18, 432, 93.4),
                    category("Data Science", 8, 123, 67.8),
                ],
                enrollment_trend: trend(&[23, 31, 28, 45, 52, 34, 41, 67, 59, 73]),
            },
            performance_metrics: PerformanceMetrics {
                system_health: ResourceHealth {
                    cpu: usage(45.0, 42.0, 78.0),
                    memory: usage(67.0, 64.0, 89.0),
                    storage: usage(23.0, 21.0, 34.0),
                    network: usage(89.0, 87.0, 95.0),
                },
                response_time: ResponseTime {
                    avg: 245.0,
                    p95: 567.0,
                    p99: 1234.0,
                },
                error_rates: ErrorRates {
                    total: 0.12,
                    api: 0.08,
                    frontend: 0.04,
                },
                carbon_footprint: CarbonFootprint {
                    daily: 8.2,
                    monthly: 245.7,
                    yearly: 2948.4,
                    saved_vs_traditional: 1234.5,
                },
            },
            learning_analytics: LearningAnalytics {
                completion_rates: CompletionRates {
                    overall: 84.3,
                    by_level: CompletionByLevel {
                        beginner: 91.2,
                        intermediate: 82.7,
                        advanced: 76.4,
                    },
                    by_duration: CompletionByDuration {
                        short: 93.1,
                        medium: 84.7,
                        long: 72.3,
                    },
                },
                learning_paths: vec![
                    path("Web Development Track", 456, 78.9),
                    path("Digital Literacy Track", 234, 89.2),
                    path("Green Computing Track", 123, 82.1),
                    path("AI Fundamentals Track", 89, 91.5),
                ],
                skill_progress: [
                    ("programming", 67.8),
                    ("digitalLiteracy", 84.2),
                    ("sustainability", 72.1),
                    ("aiEthics", 89.3),
                    ("webDevelopment", 75.6),
                ]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            },
            reports: Reports {
                generated: vec![
                    report(
                        "report_001",
                        "Monthly User Engagement Report",
                        "User Analytics",
                        "2025-06-28T10:00:00Z",
                        "PDF",
                        "2.3 MB",
                    ),
                    report(
                        "report_002",
                        "Course Performance Analysis",
                        "Course Analytics",
                        "2025-06-27T15:30:00Z",
                        "Excel",
                        "1.8 MB",
                    ),
                    report(
                        "report_003",
                        "System Performance Report",
                        "Technical",
                        "2025-06-26T09:00:00Z",
                        "PDF",
                        "1.2 MB",
                    ),
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_wire_names() {
        assert_eq!(serde_json::to_string(&Timeframe::Quarter).unwrap(), "\"90d\"");
        assert_eq!(Timeframe::parse("1y"), Some(Timeframe::Year));
        assert_eq!(Timeframe::default(), Timeframe::Month);
    }

    #[test]
    fn test_enrollment_trend_reads_backend_field() {
        let point: DailyCount =
            serde_json::from_str(r#"{"date":"2025-06-01","enrollments":23}"#).unwrap();
        assert_eq!(point.count, 23);
    }

    #[test]
    fn test_placeholder_shape() {
        let data = AnalyticsData::placeholder();
        assert_eq!(data.user_analytics.registration_trend.len(), 10);
        assert_eq!(data.user_analytics.registration_trend[9].date, "2025-06-10");
        assert_eq!(trend_peak(&data.course_analytics.enrollment_trend), 73);
        assert_eq!(data.reports.generated.len(), 3);

        let json = serde_json::to_value(&data).unwrap();
        let back: AnalyticsData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("digitalLiteracy"), "Digital Literacy");
        assert_eq!(humanize_key("programming"), "Programming");
        assert_eq!(humanize_key(""), "");
    }

    #[test]
    fn test_trend_peak_empty() {
        assert_eq!(trend_peak(&[]), 0);
    }
}
