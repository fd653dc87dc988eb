//! Form validation run before any mutation is sent.
//!
//! Every check returns the first problem found; callers surface it as a
//! notification and do not issue the request.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::ValidationError;
use crate::models::{CourseDraft, ModelConfig, SystemSettings, UserDraft, UserRole};

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub const SESSION_TIMEOUT_RANGE: (u32, u32) = (5, 1440);
pub const MAX_UPLOAD_RANGE: (u32, u32) = (1, 512);
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
pub const MAX_TOKENS_RANGE: (u32, u32) = (1, 32_768);

pub fn is_valid_email(email: &str) -> bool {
    match EMAIL_RE.as_ref() {
        Some(re) => re.is_match(email),
        None => email.contains('@'),
    }
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(())
    }
}

fn email(value: &str) -> Result<(), ValidationError> {
    if is_valid_email(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

fn within<T: PartialOrd + Into<f64> + Copy>(
    value: T,
    (min, max): (T, T),
    field: &'static str,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        Err(ValidationError::OutOfRange {
            field,
            min: min.into(),
            max: max.into(),
        })
    } else {
        Ok(())
    }
}

/// Parse the role select's raw value.
pub fn parse_role(raw: &str) -> Result<UserRole, ValidationError> {
    required(raw, "Role")?;
    UserRole::parse(raw).ok_or_else(|| ValidationError::UnknownOption {
        field: "role",
        value: raw.to_string(),
    })
}

pub fn validate_user(draft: &UserDraft) -> Result<(), ValidationError> {
    required(&draft.name, "Name")?;
    required(&draft.email, "Email")?;
    email(&draft.email)
}

pub fn validate_course(draft: &CourseDraft) -> Result<(), ValidationError> {
    required(&draft.title, "Title")?;
    required(&draft.description, "Description")?;
    required(&draft.instructor, "Instructor")?;
    required(&draft.category, "Category")?;
    required(&draft.duration, "Duration")?;
    if draft.total_lessons == 0 {
        return Err(ValidationError::Missing("Total lessons"));
    }
    Ok(())
}

pub fn validate_settings(settings: &SystemSettings) -> Result<(), ValidationError> {
    required(&settings.site_name, "Site name")?;
    required(&settings.support_email, "Support email")?;
    email(&settings.support_email)?;
    within(
        settings.session_timeout_minutes,
        SESSION_TIMEOUT_RANGE,
        "Session timeout",
    )?;
    within(settings.max_upload_mb, MAX_UPLOAD_RANGE, "Max upload size")
}

pub fn validate_model_config(config: &ModelConfig) -> Result<(), ValidationError> {
    if !config.temperature.is_finite() {
        return Err(ValidationError::OutOfRange {
            field: "Temperature",
            min: TEMPERATURE_RANGE.0,
            max: TEMPERATURE_RANGE.1,
        });
    }
    within(config.temperature, TEMPERATURE_RANGE, "Temperature")?;
    within(config.max_tokens, MAX_TOKENS_RANGE, "Max tokens")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseLevel, CourseStatus, UserStatus};

    fn user() -> UserDraft {
        UserDraft {
            name: "Sarah Johnson".into(),
            email: "sarah.johnson@university.edu".into(),
            role: UserRole::Educator,
            status: UserStatus::Active,
            location: String::new(),
        }
    }

    fn course() -> CourseDraft {
        CourseDraft {
            title: "Intro to Rust".into(),
            description: "Ownership and borrowing".into(),
            instructor: "Dr. Chen".into(),
            category: "Programming".into(),
            level: CourseLevel::Beginner,
            status: CourseStatus::Draft,
            duration: "6 weeks".into(),
            total_lessons: 12,
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.io"));
        assert!(!is_valid_email("@c.io"));
    }

    #[test]
    fn test_user_rules() {
        assert_eq!(validate_user(&user()), Ok(()));

        let mut d = user();
        d.name = "   ".into();
        assert_eq!(validate_user(&d), Err(ValidationError::Missing("Name")));

        let mut d = user();
        d.email = "not-an-email".into();
        assert_eq!(
            validate_user(&d),
            Err(ValidationError::InvalidEmail("not-an-email".into()))
        );
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(parse_role("Student"), Ok(UserRole::Student));
        assert_eq!(parse_role(""), Err(ValidationError::Missing("Role")));
        assert!(matches!(
            parse_role("Janitor"),
            Err(ValidationError::UnknownOption { field: "role", .. })
        ));
    }

    #[test]
    fn test_course_requires_all_fields() {
        assert_eq!(validate_course(&course()), Ok(()));

        let mut d = course();
        d.instructor.clear();
        assert_eq!(validate_course(&d), Err(ValidationError::Missing("Instructor")));

        let mut d = course();
        d.total_lessons = 0;
        assert!(validate_course(&d).is_err());
    }

    #[test]
    fn test_settings_ranges() {
        let mut s = SystemSettings::placeholder();
        assert_eq!(validate_settings(&s), Ok(()));

        s.session_timeout_minutes = 2;
        assert_eq!(
            validate_settings(&s),
            Err(ValidationError::OutOfRange {
                field: "Session timeout",
                min: 5.0,
                max: 1440.0
            })
        );

        let mut s = SystemSettings::placeholder();
        s.max_upload_mb = 0;
        assert!(validate_settings(&s).is_err());

        let mut s = SystemSettings::placeholder();
        s.site_name.clear();
        assert_eq!(validate_settings(&s), Err(ValidationError::Missing("Site name")));
    }

    #[test]
    fn test_model_config_ranges() {
        assert_eq!(validate_model_config(&ModelConfig::default()), Ok(()));
        assert!(validate_model_config(&ModelConfig {
            temperature: 2.5,
            max_tokens: 100
        })
        .is_err());
        assert!(validate_model_config(&ModelConfig {
            temperature: f64::NAN,
            max_tokens: 100
        })
        .is_err());
        assert!(validate_model_config(&ModelConfig {
            temperature: 1.0,
            max_tokens: 0
        })
        .is_err());
    }
}
