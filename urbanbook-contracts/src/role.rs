use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::navigation::Screen;

/// Who is signing in. Selects API endpoints and the dashboard.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Learner account.
    Student,
    /// Teacher account.
    Teacher,
}

/// A role name that is neither `student` nor `teacher`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Both roles, in card order.
    pub const ALL: [Role; 2] = [Role::Student, Role::Teacher];

    /// Stable card id on the role selection screen.
    pub fn id(self) -> u32 {
        match self {
            Role::Student => 1,
            Role::Teacher => 2,
        }
    }

    /// Card title.
    pub fn title(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
        }
    }

    /// Path segment used by the backend, as in `/api/student/...`.
    pub fn api_segment(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }

    /// Home screen of the role.
    pub fn dashboard(self) -> Screen {
        match self {
            Role::Student => Screen::StudentDashboard,
            Role::Teacher => Screen::TeacherDashboard,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts the API segment or the display title, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_user_types() {
        assert_eq!("student".parse::<Role>(), Ok(Role::Student));
        assert_eq!(" Teacher ".parse::<Role>(), Ok(Role::Teacher));
        assert_eq!(
            "admin".parse::<Role>(),
            Err(UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn serializes_as_api_segment() {
        let json = serde_json::to_string(&Role::Teacher).expect("serialize");
        assert_eq!(json, "\"teacher\"");
        assert_eq!(Role::Teacher.api_segment(), "teacher");
        assert_eq!(Role::Student.dashboard(), Screen::StudentDashboard);
    }
}
