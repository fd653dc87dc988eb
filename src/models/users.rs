//! User directory: students, educators and administrators.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Student,
    Educator,
    Administrator,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [Self::Student, Self::Educator, Self::Administrator];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Educator => "Educator",
            Self::Administrator => "Administrator",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub const ALL: [UserStatus; 2] = [Self::Active, Self::Inactive];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub last_login: String,
    pub join_date: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_assignments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

/// List payload of the users endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserList(pub Vec<User>);

/// Editable fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub location: String,
}

impl UserDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            status: user.status,
            location: user.location.clone(),
        }
    }

    /// Apply the draft to an existing record, keeping everything else.
    pub fn apply_to(&self, user: &User) -> User {
        User {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            status: self.status,
            location: self.location.clone(),
            ..user.clone()
        }
    }

    /// Build the local record shown until the backend confirms the create.
    pub fn into_user(self, id: String, now_iso: &str) -> User {
        let is_admin = self.role == UserRole::Administrator;
        User {
            id,
            avatar: crate::utils::format::initials(&self.name),
            location: if self.location.is_empty() {
                "Unknown".to_string()
            } else {
                self.location
            },
            name: self.name,
            email: self.email,
            role: self.role,
            status: self.status,
            last_login: now_iso.to_string(),
            join_date: now_iso.to_string(),
            courses: Some(0),
            completed_assignments: Some(0),
            gpa: None,
            students: None,
            rating: None,
            permissions: if is_admin {
                vec!["all".to_string()]
            } else {
                Vec::new()
            },
        }
    }
}

/// Role/status filters plus free-text search over name and email.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub query: String,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        let role_ok = self.role.is_none_or(|r| r == user.role);
        let status_ok = self.status.is_none_or(|s| s == user.status);
        let query = self.query.trim().to_lowercase();
        let query_ok = query.is_empty()
            || user.name.to_lowercase().contains(&query)
            || user.email.to_lowercase().contains(&query);
        role_ok && status_ok && query_ok
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

/// Head counts for the stats cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub students: usize,
    pub educators: usize,
    pub administrators: usize,
    pub active: usize,
}

impl UserStats {
    pub fn from_users(users: &[User]) -> Self {
        users.iter().fold(Self::default(), |mut acc, u| {
            match u.role {
                UserRole::Student => acc.students += 1,
                UserRole::Educator => acc.educators += 1,
                UserRole::Administrator => acc.administrators += 1,
            }
            if u.status == UserStatus::Active {
                acc.active += 1;
            }
            acc
        })
    }
}

impl UserList {
    pub fn placeholder() -> Self {
        struct Seed<'a> {
            id: &'a str,
            name: &'a str,
            email: &'a str,
            role: UserRole,
            status: UserStatus,
            last_login: &'a str,
            join_date: &'a str,
            avatar: &'a str,
            location: &'a str,
        }

        let base = |s: Seed<'_>| User {
            id: s.id.to_string(),
            name: s.name.to_string(),
            email: s.email.to_string(),
            role: s.role,
            status: s.status,
            last_login: s.last_login.to_string(),
            join_date: s.join_date.to_string(),
            avatar: s.avatar.to_string(),
            location: s.location.to_string(),
            courses: None,
            completed_assignments: None,
            gpa: None,
            students: None,
            rating: None,
            permissions: Vec::new(),
        };
        let student = |s: Seed<'_>, courses, done, gpa| User {
            courses: Some(courses),
            completed_assignments: Some(done),
            gpa: Some(gpa),
            ..base(s)
        };
        let educator = |s: Seed<'_>, courses, students, rating| User {
            courses: Some(courses),
            students: Some(students),
            rating: Some(rating),
            ..base(s)
        };

        use UserRole::*;
        use UserStatus::*;
        Self(vec![
            student(
                Seed {
                    id: "user_001",
                    name: "Sarah Johnson",
                    email: "sarah.johnson@email.com",
                    role: Student,
                    status: Active,
                    last_login: "2025-06-28T10:30:00Z",
                    join_date: "2025-06-01T00:00:00Z",
                    avatar: "SJ",
                    location: "New York, USA",
                },
                3,
                12,
                3.8,
            ),
            educator(
                Seed {
                    id: "user_002",
                    name: "Dr. Michael Chen",
                    email: "michael.chen@agenticlearn.com",
                    role: Educator,
                    status: Active,
                    last_login: "2025-06-28T09:15:00Z",
                    join_date: "2025-05-15T00:00:00Z",
                    avatar: "MC",
                    location: "California, USA",
                },
                5,
                89,
                4.9,
            ),
            User {
                permissions: vec!["all".to_string()],
                ..base(Seed {
                    id: "user_003",
                    name: "Admin User",
                    email: "admin@agenticlearn.com",
                    role: Administrator,
                    status: Active,
                    last_login: "2025-06-28T11:00:00Z",
                    join_date: "2025-01-01T00:00:00Z",
                    avatar: "AU",
                    location: "System",
                })
            },
            student(
                Seed {
                    id: "user_004",
                    name: "Emma Wilson",
                    email: "emma.wilson@email.com",
                    role: Student,
                    status: Active,
                    last_login: "2025-06-28T08:45:00Z",
                    join_date: "2025-05-20T00:00:00Z",
                    avatar: "EW",
                    location: "London, UK",
                },
                2,
                8,
                3.6,
            ),
            educator(
                Seed {
                    id: "user_005",
                    name: "Prof. David Kim",
                    email: "david.kim@agenticlearn.com",
                    role: Educator,
                    status: Active,
                    last_login: "2025-06-28T07:20:00Z",
                    join_date: "2025-04-10T00:00:00Z",
                    avatar: "DK",
                    location: "Seoul, Korea",
                },
                3,
                67,
                4.7,
            ),
            student(
                Seed {
                    id: "user_006",
                    name: "Alex Rodriguez",
                    email: "alex.rodriguez@email.com",
                    role: Student,
                    status: Inactive,
                    last_login: "2025-06-25T14:30:00Z",
                    join_date: "2025-05-05T00:00:00Z",
                    avatar: "AR",
                    location: "Madrid, Spain",
                },
                1,
                3,
                2.9,
            ),
            student(
                Seed {
                    id: "user_007",
                    name: "Lisa Zhang",
                    email: "lisa.zhang@email.com",
                    role: Student,
                    status: Active,
                    last_login: "2025-06-28T12:15:00Z",
                    join_date: "2025-06-10T00:00:00Z",
                    avatar: "LZ",
                    location: "Singapore",
                },
                4,
                15,
                4.0,
            ),
            educator(
                Seed {
                    id: "user_008",
                    name: "Dr. Maria Santos",
                    email: "maria.santos@agenticlearn.com",
                    role: Educator,
                    status: Active,
                    last_login: "2025-06-28T11:45:00Z",
                    join_date: "2025-03-15T00:00:00Z",
                    avatar: "MS",
                    location: "São Paulo, Brazil",
                },
                4,
                112,
                4.8,
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_from_placeholder() {
        let users = UserList::placeholder().0;
        let stats = UserStats::from_users(&users);
        assert_eq!(
            stats,
            UserStats {
                students: 4,
                educators: 3,
                administrators: 1,
                active: 7,
            }
        );
    }

    #[test]
    fn test_filter_by_role_status_and_query() {
        let users = UserList::placeholder().0;

        let filter = UserFilter {
            role: Some(UserRole::Student),
            status: Some(UserStatus::Inactive),
            ..Default::default()
        };
        let hits = filter.apply(&users);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alex Rodriguez");

        let filter = UserFilter {
            query: "AGENTICLEARN.com".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&users).len(), 4);

        assert_eq!(UserFilter::default().apply(&users).len(), users.len());
    }

    #[test]
    fn test_draft_into_user() {
        let draft = UserDraft {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            role: UserRole::Administrator,
            status: UserStatus::Active,
            location: String::new(),
        };
        let user = draft.into_user("user_tmp".into(), "2025-07-01T00:00:00Z");
        assert_eq!(user.avatar, "AL");
        assert_eq!(user.location, "Unknown");
        assert_eq!(user.permissions, vec!["all".to_string()]);
    }

    #[test]
    fn test_draft_apply_keeps_other_fields() {
        let user = UserList::placeholder().0.remove(0);
        let mut draft = UserDraft::from_user(&user);
        draft.status = UserStatus::Inactive;
        let updated = draft.apply_to(&user);
        assert_eq!(updated.status, UserStatus::Inactive);
        assert_eq!(updated.gpa, user.gpa);
        assert_eq!(updated.id, user.id);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("Educator"), Some(UserRole::Educator));
        assert_eq!(UserRole::parse("educator"), None);
    }
}
