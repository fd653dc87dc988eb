//! Course catalogue.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub const ALL: [CourseLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseStatus {
    Published,
    Draft,
    Archived,
}

impl CourseStatus {
    pub const ALL: [CourseStatus; 3] = [Self::Published, Self::Draft, Self::Archived];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "Published",
            Self::Draft => "Draft",
            Self::Archived => "Archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: CourseLevel,
    pub status: CourseStatus,
    pub instructor: String,
    #[serde(default)]
    pub instructor_id: String,
    #[serde(default)]
    pub thumbnail: String,
    pub duration: String,
    pub total_lessons: u32,
    pub enrolled_students: u32,
    pub completion_rate: u8,
    pub rating: f32,
    pub reviews: u32,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_date: String,
    pub last_updated: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseList(pub Vec<Course>);

/// Editable fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub category: String,
    pub level: CourseLevel,
    pub status: CourseStatus,
    pub duration: String,
    pub total_lessons: u32,
}

impl CourseDraft {
    pub fn from_course(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone(),
            instructor: course.instructor.clone(),
            category: course.category.clone(),
            level: course.level,
            status: course.status,
            duration: course.duration.clone(),
            total_lessons: course.total_lessons,
        }
    }

    pub fn apply_to(&self, course: &Course, now_iso: &str) -> Course {
        Course {
            title: self.title.clone(),
            description: self.description.clone(),
            instructor: self.instructor.clone(),
            category: self.category.clone(),
            level: self.level,
            status: self.status,
            duration: self.duration.clone(),
            total_lessons: self.total_lessons,
            last_updated: now_iso.to_string(),
            ..course.clone()
        }
    }

    /// Local record shown until the backend confirms the create.
    pub fn into_course(self, id: String, now_iso: &str) -> Course {
        Course {
            id,
            tags: vec![self.category.clone(), self.level.as_str().to_string()],
            title: self.title,
            description: self.description,
            category: self.category,
            level: self.level,
            status: self.status,
            instructor: self.instructor,
            instructor_id: "admin_created".to_string(),
            thumbnail: "📚".to_string(),
            duration: self.duration,
            total_lessons: self.total_lessons,
            enrolled_students: 0,
            completion_rate: 0,
            rating: 0.0,
            reviews: 0,
            price: "Free".to_string(),
            created_date: now_iso.to_string(),
            last_updated: now_iso.to_string(),
            language: "English".to_string(),
            prerequisites: vec!["None".to_string()],
            learning_outcomes: vec!["Course content to be defined".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub status: Option<CourseStatus>,
    pub level: Option<CourseLevel>,
    pub query: String,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| c == course.category);
        let status_ok = self.status.is_none_or(|s| s == course.status);
        let level_ok = self.level.is_none_or(|l| l == course.level);
        let query = self.query.trim().to_lowercase();
        let query_ok = query.is_empty()
            || course.title.to_lowercase().contains(&query)
            || course.instructor.to_lowercase().contains(&query);
        category_ok && status_ok && level_ok && query_ok
    }

    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Distinct categories with course counts, in alphabetical order.
pub fn categories(courses: &[Course]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for course in courses {
        *counts.entry(course.category.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CourseStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub total_students: u64,
    /// Mean rating over published courses, 0 when none are published.
    pub average_rating: f32,
}

impl CourseStats {
    pub fn from_courses(courses: &[Course]) -> Self {
        let published: Vec<&Course> = courses
            .iter()
            .filter(|c| c.status == CourseStatus::Published)
            .collect();
        let average_rating = if published.is_empty() {
            0.0
        } else {
            published.iter().map(|c| c.rating).sum::<f32>() / published.len() as f32
        };
        Self {
            total: courses.len(),
            published: published.len(),
            drafts: courses
                .iter()
                .filter(|c| c.status == CourseStatus::Draft)
                .count(),
            total_students: courses.iter().map(|c| c.enrolled_students as u64).sum(),
            average_rating,
        }
    }
}

impl CourseList {
    pub fn placeholder() -> Self {
        struct Seed<'a> {
            id: &'a str,
            title: &'a str,
            description: &'a str,
            category: &'a str,
            level: CourseLevel,
            status: CourseStatus,
            instructor: &'a str,
            instructor_id: &'a str,
            thumbnail: &'a str,
            duration: &'a str,
            total_lessons: u32,
            enrolled_students: u32,
            completion_rate: u8,
            rating: f32,
            reviews: u32,
            tags: &'a [&'a str],
            created_date: &'a str,
            last_updated: &'a str,
            prerequisites: &'a [&'a str],
            learning_outcomes: &'a [&'a str],
        }

        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let build = |s: Seed<'_>| Course {
            id: s.id.to_string(),
            title: s.title.to_string(),
            description: s.description.to_string(),
            category: s.category.to_string(),
            level: s.level,
            status: s.status,
            instructor: s.instructor.to_string(),
            instructor_id: s.instructor_id.to_string(),
            thumbnail: s.thumbnail.to_string(),
            duration: s.duration.to_string(),
            total_lessons: s.total_lessons,
            enrolled_students: s.enrolled_students,
            completion_rate: s.completion_rate,
            rating: s.rating,
            reviews: s.reviews,
            price: "Free".to_string(),
            tags: owned(s.tags),
            created_date: s.created_date.to_string(),
            last_updated: s.last_updated.to_string(),
            language: "English".to_string(),
            prerequisites: owned(s.prerequisites),
            learning_outcomes: owned(s.learning_outcomes),
        };

        use CourseLevel::*;
        use CourseStatus::*;
        Self(vec![
            build(Seed {
                id: "course_001",
                title: "JavaScript Fundamentals",
                description: "Learn the basics of JavaScript programming including variables, functions, and DOM manipulation.",
                category: "Programming",
                level: Beginner,
                status: Published,
                instructor: "Dr. Michael Chen",
                instructor_id: "user_002",
                thumbnail: "💻",
                duration: "8 weeks",
                total_lessons: 24,
                enrolled_students: 234,
                completion_rate: 87,
                rating: 4.8,
                reviews: 156,
                tags: &["JavaScript", "Programming", "Web Development"],
                created_date: "2025-05-01T00:00:00Z",
                last_updated: "2025-06-20T00:00:00Z",
                prerequisites: &["Basic Computer Skills"],
                learning_outcomes: &[
                    "Understand JavaScript syntax and fundamentals",
                    "Create interactive web pages",
                    "Work with functions and objects",
                    "Manipulate the DOM effectively",
                ],
            }),
            build(Seed {
                id: "course_002",
                title: "Digital Literacy Basics",
                description: "Essential digital skills for the modern world including internet safety, digital communication, and basic computer operations.",
                category: "Digital Literacy",
                level: Beginner,
                status: Published,
                instructor: "Prof. Sarah Wilson",
                instructor_id: "user_004",
                thumbnail: "🌐",
                duration: "6 weeks",
                total_lessons: 18,
                enrolled_students: 189,
                completion_rate: 92,
                rating: 4.9,
                reviews: 98,
                tags: &["Digital Skills", "Internet Safety", "Communication"],
                created_date: "2025-04-15T00:00:00Z",
                last_updated: "2025-06-15T00:00:00Z",
                prerequisites: &["None"],
                learning_outcomes: &[
                    "Navigate the internet safely and effectively",
                    "Use digital communication tools",
                    "Understand online privacy and security",
                    "Manage digital files and folders",
                ],
            }),
            build(Seed {
                id: "course_003",
                title: "Green Computing Principles",
                description: "Learn about sustainable technology practices, energy-efficient computing, and environmental impact of digital technologies.",
                category: "Sustainability",
                level: Intermediate,
                status: Published,
                instructor: "Dr. Maria Santos",
                instructor_id: "user_008",
                thumbnail: "🌱",
                duration: "10 weeks",
                total_lessons: 30,
                enrolled_students: 156,
                completion_rate: 78,
                rating: 4.7,
                reviews: 89,
                tags: &["Green Computing", "Sustainability", "Environment"],
                created_date: "2025-03-20T00:00:00Z",
                last_updated: "2025-06-10T00:00:00Z",
                prerequisites: &["Basic Computer Knowledge"],
                learning_outcomes: &[
                    "Understand environmental impact of computing",
                    "Implement energy-efficient practices",
                    "Design sustainable technology solutions",
                    "Evaluate carbon footprint of digital activities",
                ],
            }),
            build(Seed {
                id: "course_004",
                title: "Web Development Introduction",
                description: "Comprehensive introduction to web development covering HTML, CSS, and basic JavaScript for creating modern websites.",
                category: "Web Development",
                level: Beginner,
                status: Published,
                instructor: "Prof. David Kim",
                instructor_id: "user_005",
                thumbnail: "🌐",
                duration: "12 weeks",
                total_lessons: 36,
                enrolled_students: 145,
                completion_rate: 83,
                rating: 4.6,
                reviews: 72,
                tags: &["HTML", "CSS", "JavaScript", "Web Design"],
                created_date: "2025-04-01T00:00:00Z",
                last_updated: "2025-06-25T00:00:00Z",
                prerequisites: &["Digital Literacy Basics"],
                learning_outcomes: &[
                    "Create responsive web pages with HTML and CSS",
                    "Add interactivity with JavaScript",
                    "Understand web development best practices",
                    "Deploy websites to the internet",
                ],
            }),
            build(Seed {
                id: "course_005",
                title: "AI Ethics & Safety",
                description: "Explore the ethical implications of artificial intelligence, safety considerations, and responsible AI development practices.",
                category: "AI & Ethics",
                level: Advanced,
                status: Published,
                instructor: "Dr. Michael Chen",
                instructor_id: "user_002",
                thumbnail: "🤖",
                duration: "8 weeks",
                total_lessons: 24,
                enrolled_students: 123,
                completion_rate: 95,
                rating: 4.9,
                reviews: 67,
                tags: &["AI", "Ethics", "Safety", "Technology"],
                created_date: "2025-05-10T00:00:00Z",
                last_updated: "2025-06-28T00:00:00Z",
                prerequisites: &["Basic understanding of AI concepts"],
                learning_outcomes: &[
                    "Understand ethical implications of AI",
                    "Identify potential AI safety risks",
                    "Apply responsible AI development practices",
                    "Evaluate AI systems for bias and fairness",
                ],
            }),
            build(Seed {
                id: "course_006",
                title: "Data Science Fundamentals",
                description: "Introduction to data science concepts, statistical analysis, and data visualization techniques.",
                category: "Data Science",
                level: Intermediate,
                status: Draft,
                instructor: "Dr. Maria Santos",
                instructor_id: "user_008",
                thumbnail: "📊",
                duration: "14 weeks",
                total_lessons: 42,
                enrolled_students: 0,
                completion_rate: 0,
                rating: 0.0,
                reviews: 0,
                tags: &["Data Science", "Statistics", "Visualization"],
                created_date: "2025-06-01T00:00:00Z",
                last_updated: "2025-06-28T00:00:00Z",
                prerequisites: &["JavaScript Fundamentals", "Basic Mathematics"],
                learning_outcomes: &[
                    "Understand data science workflow",
                    "Perform statistical analysis",
                    "Create data visualizations",
                    "Work with large datasets",
                ],
            }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_from_placeholder() {
        let courses = CourseList::placeholder().0;
        let stats = CourseStats::from_courses(&courses);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.published, 5);
        assert_eq!(stats.drafts, 1);
        assert_eq!(stats.total_students, 847);
        assert!((stats.average_rating - 4.78).abs() < 0.01);
    }

    #[test]
    fn test_stats_without_published() {
        let stats = CourseStats::from_courses(&[]);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.total, 0);
    }

    #[test]
    fn test_categories_counted() {
        let courses = CourseList::placeholder().0;
        let cats = categories(&courses);
        assert_eq!(cats.len(), 6);
        assert_eq!(cats[0], ("AI & Ethics".to_string(), 1));
    }

    #[test]
    fn test_filter() {
        let courses = CourseList::placeholder().0;

        let filter = CourseFilter {
            level: Some(CourseLevel::Beginner),
            ..Default::default()
        };
        assert_eq!(filter.apply(&courses).len(), 3);

        let filter = CourseFilter {
            query: "maria".into(),
            status: Some(CourseStatus::Published),
            ..Default::default()
        };
        let hits = filter.apply(&courses);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "course_003");

        let filter = CourseFilter {
            category: Some("Programming".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&courses).len(), 1);
    }

    #[test]
    fn test_draft_into_course() {
        let draft = CourseDraft {
            title: "Rust Basics".into(),
            description: "Ownership and borrowing".into(),
            instructor: "Prof. David Kim".into(),
            category: "Programming".into(),
            level: CourseLevel::Intermediate,
            status: CourseStatus::Draft,
            duration: "4 weeks".into(),
            total_lessons: 12,
        };
        let course = draft.into_course("course_tmp".into(), "2025-07-01T00:00:00Z");
        assert_eq!(course.tags, vec!["Programming", "Intermediate"]);
        assert_eq!(course.enrolled_students, 0);
        assert_eq!(course.created_date, course.last_updated);
    }

    #[test]
    fn test_placeholder_serializes_camel_case() {
        let json = serde_json::to_value(CourseList::placeholder()).unwrap();
        assert_eq!(json[0]["enrolledStudents"], 234);
        assert_eq!(json[5]["status"], "Draft");
    }
}
