//! Profile completion after first verification.

use log::{info, warn};

use urbanbook_contracts::prelude::{
    Navigator, ProfileUpdate, ProfileUpdateResponse, Role, Route, RouteParams,
    VerificationResponse,
};

use crate::error::ProfileFormError;
use crate::infra::api_client::AccountService;

const UPDATE_REJECTED: &str = "Failed to update profile";

/// Raw text inputs, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFormFields {
    pub name: String,
    pub gender: String,
    pub age: String,
    pub grade: String,
    pub school: String,
    pub subject: String,
    pub experience_years: String,
}

impl ProfileFormFields {
    /// Prefill from what the backend already knows.
    pub fn from_user(user: &VerificationResponse) -> Self {
        Self {
            name: user.name.clone().unwrap_or_default(),
            gender: user.gender.clone().unwrap_or_default(),
            age: user.age.map(|age| age.to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }
}

fn parse_whole_number(raw: &str) -> Result<Option<u32>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| raw.to_string())
}

/// Build the update payload for `user`. Students send grade and school,
/// teachers send subject and experience years (0 when left blank).
pub fn build_profile_update(
    user: &VerificationResponse,
    fields: &ProfileFormFields,
) -> Result<ProfileUpdate, ProfileFormError> {
    let user_id = user
        .user_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or(ProfileFormError::MissingUserId)?;
    let age = parse_whole_number(&fields.age)
        .map_err(ProfileFormError::InvalidAge)?;

    let mut update = ProfileUpdate {
        user_id,
        name: fields.name.clone(),
        gender: fields.gender.clone(),
        age,
        ..ProfileUpdate::default()
    };
    match user.role() {
        Some(Role::Student) => {
            update.grade = Some(fields.grade.clone());
            update.school = Some(fields.school.clone());
        }
        Some(Role::Teacher) => {
            let years = parse_whole_number(&fields.experience_years)
                .map_err(ProfileFormError::InvalidExperience)?;
            update.subject = Some(fields.subject.clone());
            update.experience_years = Some(years.unwrap_or(0));
        }
        None => warn!(
            "[ProfileForm] unknown user type {:?}, sending base fields only",
            user.user_type
        ),
    }
    Ok(update)
}

#[derive(Debug)]
pub struct ProfileForm<S> {
    user: VerificationResponse,
    fields: ProfileFormFields,
    service: S,
}

impl<S> ProfileForm<S>
where
    S: AccountService,
{
    /// Open the form for `route`. Without user data (or a user id) the
    /// screen backs out and `None` is returned.
    pub fn open(
        route: &Route,
        service: S,
        navigator: &mut dyn Navigator,
    ) -> Option<Self> {
        match route.user_data() {
            Some(user) if user.user_id.is_some() => Some(Self {
                fields: ProfileFormFields::from_user(user),
                user: user.clone(),
                service,
            }),
            _ => {
                warn!("[ProfileForm] User data is missing, going back");
                navigator.go_back();
                None
            }
        }
    }

    pub fn user(&self) -> &VerificationResponse {
        &self.user
    }

    pub fn fields(&self) -> &ProfileFormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ProfileFormFields {
        &mut self.fields
    }

    /// Endpoint role: anything that is not a student uses the teacher one.
    fn endpoint_role(&self) -> Role {
        self.user.role().unwrap_or(Role::Teacher)
    }

    pub async fn submit(
        &self,
        navigator: &mut dyn Navigator,
    ) -> Result<ProfileUpdateResponse, ProfileFormError> {
        let update = build_profile_update(&self.user, &self.fields)?;
        let user_id = update.user_id.clone();
        let role = self.endpoint_role();

        let response = self.service.update_profile(role, update).await?;
        if !response.success {
            let message = response
                .message
                .clone()
                .unwrap_or_else(|| UPDATE_REJECTED.into());
            warn!("[ProfileForm] update rejected: {}", message);
            return Err(ProfileFormError::Rejected(message));
        }

        let dashboard = self.user.dashboard(role);
        info!(
            "[ProfileForm] profile {} updated, opening {}",
            user_id, dashboard
        );
        navigator.navigate(Route::with_params(
            dashboard,
            RouteParams::UserId(user_id),
        ));
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::navigation::NavigationStack;
    use crate::infra::api_client::MockAccountService;
    use urbanbook_contracts::prelude::Screen;

    fn user(user_type: &str) -> VerificationResponse {
        VerificationResponse {
            success: true,
            user_id: Some("7".into()),
            user_type: Some(user_type.into()),
            name: Some("Asha".into()),
            age: Some(15),
            ..VerificationResponse::default()
        }
    }

    #[test]
    fn student_update_carries_grade_and_school() {
        let mut fields = ProfileFormFields::from_user(&user("student"));
        fields.grade = "10".into();
        fields.school = "City High".into();
        fields.subject = "ignored".into();

        let update =
            build_profile_update(&user("student"), &fields).expect("valid");
        assert_eq!(update.age, Some(15));
        assert_eq!(update.grade.as_deref(), Some("10"));
        assert_eq!(update.subject, None);
        assert_eq!(update.experience_years, None);
    }

    #[test]
    fn teacher_experience_defaults_to_zero() {
        let fields = ProfileFormFields {
            subject: "Physics".into(),
            ..ProfileFormFields::default()
        };
        let update =
            build_profile_update(&user("teacher"), &fields).expect("valid");
        assert_eq!(update.age, None);
        assert_eq!(update.experience_years, Some(0));
        assert_eq!(update.grade, None);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let fields = ProfileFormFields {
            age: "fifteen".into(),
            ..ProfileFormFields::default()
        };
        assert!(matches!(
            build_profile_update(&user("student"), &fields),
            Err(ProfileFormError::InvalidAge(raw)) if raw == "fifteen"
        ));

        let fields = ProfileFormFields {
            experience_years: "-2".into(),
            ..ProfileFormFields::default()
        };
        assert!(matches!(
            build_profile_update(&user("teacher"), &fields),
            Err(ProfileFormError::InvalidExperience(_))
        ));
    }

    #[test]
    fn missing_user_id_backs_out() {
        let mut nav = NavigationStack::default();
        let route = Route::new(Screen::CompleteProfile);
        nav.navigate(route.clone());
        let form =
            ProfileForm::open(&route, MockAccountService::new(), &mut nav);
        assert!(form.is_none());
        assert_eq!(nav.current().screen, Screen::Welcome);
    }

    #[tokio::test]
    async fn successful_submit_opens_dashboard() {
        let mut service = MockAccountService::new();
        service
            .expect_update_profile()
            .withf(|role, update| {
                *role == Role::Student && update.school.is_some()
            })
            .times(1)
            .returning(|_, _| {
                Ok(ProfileUpdateResponse {
                    success: true,
                    message: None,
                })
            });

        let mut nav = NavigationStack::default();
        let route = Route::with_params(
            Screen::CompleteProfile,
            RouteParams::UserData(Box::new(user("student"))),
        );
        nav.navigate(route.clone());
        let form = ProfileForm::open(&route, service, &mut nav).expect("open");
        form.submit(&mut nav).await.expect("updated");

        assert_eq!(nav.current().screen, Screen::StudentDashboard);
        assert_eq!(nav.current().params, RouteParams::UserId("7".into()));
    }

    #[tokio::test]
    async fn rejected_submit_keeps_form_open() {
        let mut service = MockAccountService::new();
        service.expect_update_profile().returning(|_, _| {
            Ok(ProfileUpdateResponse::default())
        });
        let route = Route::with_params(
            Screen::CompleteProfile,
            RouteParams::UserData(Box::new(user("teacher"))),
        );
        let mut nav = NavigationStack::default();
        nav.navigate(route.clone());
        let form = ProfileForm::open(&route, service, &mut nav).expect("open");

        let err = form.submit(&mut nav).await.expect_err("rejected");
        assert_eq!(err.to_string(), "Failed to update profile");
        assert_eq!(nav.current().screen, Screen::CompleteProfile);
    }
}
