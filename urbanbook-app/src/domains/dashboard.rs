use urbanbook_contracts::prelude::{
    Navigator, Role, Route, RouteParams, Screen, VerificationResponse,
};

const NOT_AVAILABLE: &str = "Not available";

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    role: Role,
    user: Option<VerificationResponse>,
    user_id: Option<String>,
}

impl Dashboard {
    /// `None` unless `route` points at a dashboard.
    pub fn from_route(route: &Route) -> Option<Self> {
        let role = match route.screen {
            Screen::StudentDashboard => Role::Student,
            Screen::TeacherDashboard => Role::Teacher,
            _ => return None,
        };
        let (user, user_id) = match &route.params {
            RouteParams::UserData(user) => {
                (Some((**user).clone()), user.user_id.clone())
            }
            RouteParams::UserId(id) => (None, Some(id.clone())),
            _ => (None, None),
        };
        Some(Self {
            role,
            user,
            user_id,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn title(&self) -> String {
        format!("{} Dashboard", self.role)
    }

    pub fn greeting(&self) -> String {
        let name = self
            .user
            .as_ref()
            .and_then(|user| user.name.as_deref())
            .unwrap_or(self.role.title());
        format!("Welcome back, {}!", name)
    }

    /// Name, id and contact rows of the profile card.
    pub fn profile_rows(&self) -> [(&'static str, String); 3] {
        let user = self.user.as_ref();
        let or_missing = |value: Option<&str>| {
            value.unwrap_or(NOT_AVAILABLE).to_string()
        };
        [
            ("Name", or_missing(user.and_then(|u| u.name.as_deref()))),
            ("ID", or_missing(self.user_id.as_deref())),
            (
                "Contact",
                or_missing(user.and_then(|u| u.identity_value.as_deref())),
            ),
        ]
    }

    pub fn logout(&self, navigator: &mut dyn Navigator) {
        log::info!("[Dashboard] {} logged out", self.role);
        navigator.reset_to(Screen::Welcome);
    }
}
