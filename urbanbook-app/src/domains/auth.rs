//! Authentication: identity SDK login followed by backend verification.

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use urbanbook_contracts::prelude::{
    IdentityResult, Navigator, RawIdentityResult, Role, Route, RouteParams,
    VerificationResponse,
};

use crate::error::AuthFlowError;
use crate::infra::api_client::AccountService;

const LOGIN_FAILED: &str = "Login failed";
const VERIFICATION_REJECTED: &str =
    "Could not verify your identity. Please try again.";

/// Third-party identity SDK. Shows its login page and reports back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn show_login_page(&self, app_id: String) -> RawIdentityResult;
}

/// What the auth screen shows under the login button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Idle,
    Authenticating,
    Verifying,
    Verified(String),
    Failed(String),
}

#[derive(Debug)]
pub struct AuthFlow<S> {
    role: Role,
    app_id: Arc<str>,
    service: S,
    status: AuthStatus,
}

impl<S> AuthFlow<S>
where
    S: AccountService,
{
    pub fn new(role: Role, app_id: Arc<str>, service: S) -> Self {
        Self {
            role,
            app_id,
            service,
            status: AuthStatus::Idle,
        }
    }

    /// Auth screen opened with `route`. Without a role param the student
    /// flow is used.
    pub fn from_route(route: &Route, app_id: Arc<str>, service: S) -> Self {
        Self::new(route.role().unwrap_or(Role::Student), app_id, service)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.status,
            AuthStatus::Authenticating | AuthStatus::Verifying
        )
    }

    /// Run the whole login: SDK page, then verification and navigation.
    pub async fn login(
        &mut self,
        identity: &dyn IdentityProvider,
        navigator: &mut dyn Navigator,
    ) -> Result<VerificationResponse, AuthFlowError> {
        self.status = AuthStatus::Authenticating;
        let raw = identity.show_login_page(self.app_id.to_string()).await;
        self.handle_identity_result(raw.into(), navigator).await
    }

    pub async fn handle_identity_result(
        &mut self,
        result: IdentityResult,
        navigator: &mut dyn Navigator,
    ) -> Result<VerificationResponse, AuthFlowError> {
        let payload = match result {
            IdentityResult::Authenticated(payload) => payload,
            IdentityResult::Failed { message } => {
                let message = message.unwrap_or_else(|| LOGIN_FAILED.into());
                return Err(self.fail(AuthFlowError::Identity(message)));
            }
        };
        let Some(token) = payload.token() else {
            return Err(self.fail(AuthFlowError::MissingToken));
        };
        info!(
            "[AuthFlow] identity token received for {} ({} identities)",
            self.role,
            payload.identities.len()
        );
        self.verify(token, navigator).await
    }

    /// Verify `token` with the backend. On success the auth screen is
    /// replaced by the dashboard the server names.
    pub async fn verify(
        &mut self,
        token: &str,
        navigator: &mut dyn Navigator,
    ) -> Result<VerificationResponse, AuthFlowError> {
        self.status = AuthStatus::Verifying;
        let response = match self
            .service
            .verify_token(self.role, token.to_string())
            .await
        {
            Ok(response) => response,
            Err(err) => return Err(self.fail(err.into())),
        };

        if !response.success {
            let message = response
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| VERIFICATION_REJECTED.into());
            return Err(self.fail(AuthFlowError::Rejected(message)));
        }

        let dashboard = response.dashboard(self.role);
        info!("[AuthFlow] verified {}, opening {}", self.role, dashboard);
        self.status =
            AuthStatus::Verified(response.message.clone().unwrap_or_default());
        navigator.replace(Route::with_params(
            dashboard,
            RouteParams::UserData(Box::new(response.clone())),
        ));
        Ok(response)
    }

    fn fail(&mut self, err: AuthFlowError) -> AuthFlowError {
        warn!("[AuthFlow] {} login failed: {}", self.role, err);
        self.status = AuthStatus::Failed(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::navigation::NavigationStack;
    use crate::error::ApiError;
    use crate::infra::api_client::MockAccountService;
    use mockall::predicate::eq;
    use urbanbook_contracts::prelude::{IdentityPayload, Screen};

    fn auth_stack() -> NavigationStack {
        let mut nav = NavigationStack::default();
        nav.navigate(Route::new(Screen::RoleSelection));
        nav.navigate(Route::with_params(
            Screen::Auth,
            RouteParams::Role(Role::Teacher),
        ));
        nav
    }

    fn payload(token: Option<&str>) -> IdentityResult {
        IdentityResult::Authenticated(IdentityPayload {
            token: token.map(str::to_string),
            user_id: Some("otp-1".into()),
            identities: Vec::new(),
        })
    }

    #[tokio::test]
    async fn verified_token_replaces_auth_with_dashboard() {
        let mut service = MockAccountService::new();
        service
            .expect_verify_token()
            .with(eq(Role::Teacher), eq("tkn".to_string()))
            .times(1)
            .returning(|_, _| {
                Ok(VerificationResponse {
                    success: true,
                    message: Some("ok".into()),
                    user_id: Some("42".into()),
                    user_type: Some("teacher".into()),
                    dashboard_route: Some("TeacherDashboard".into()),
                    ..VerificationResponse::default()
                })
            });

        let mut nav = auth_stack();
        let route = nav.current().clone();
        let mut flow = AuthFlow::from_route(&route, Arc::from("app"), service);
        let response = flow
            .handle_identity_result(payload(Some("tkn")), &mut nav)
            .await
            .expect("verified");

        assert_eq!(response.user_id.as_deref(), Some("42"));
        assert_eq!(nav.depth(), 3);
        assert_eq!(nav.current().screen, Screen::TeacherDashboard);
        assert_eq!(
            nav.current().user_data().and_then(|u| u.user_id.as_deref()),
            Some("42")
        );
        assert_eq!(flow.status(), &AuthStatus::Verified("ok".into()));
    }

    #[tokio::test]
    async fn missing_token_never_reaches_backend() {
        let mut service = MockAccountService::new();
        service.expect_verify_token().never();

        let mut nav = auth_stack();
        let mut flow = AuthFlow::new(Role::Student, Arc::from("app"), service);
        let err = flow
            .handle_identity_result(payload(None), &mut nav)
            .await
            .expect_err("no token");

        assert!(matches!(err, AuthFlowError::MissingToken));
        assert_eq!(
            flow.status(),
            &AuthStatus::Failed(
                "No token received from authentication service".into()
            )
        );
        assert_eq!(nav.current().screen, Screen::Auth);
    }

    #[tokio::test]
    async fn sdk_failure_defaults_message() {
        let mut flow = AuthFlow::new(
            Role::Student,
            Arc::from("app"),
            MockAccountService::new(),
        );
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_show_login_page()
            .with(eq("app".to_string()))
            .returning(|_| RawIdentityResult::default());

        let mut nav = auth_stack();
        let err = flow
            .login(&identity, &mut nav)
            .await
            .expect_err("no data");
        assert_eq!(err.to_string(), "Login failed");
    }

    #[tokio::test]
    async fn rejection_surfaces_server_message() {
        let mut service = MockAccountService::new();
        service.expect_verify_token().returning(|_, _| {
            Ok(VerificationResponse {
                success: false,
                message: Some("Token expired".into()),
                ..VerificationResponse::default()
            })
        });
        let mut nav = auth_stack();
        let mut flow = AuthFlow::new(Role::Teacher, Arc::from("app"), service);

        let err = flow.verify("tkn", &mut nav).await.expect_err("rejected");
        assert_eq!(err.to_string(), "Token expired");
        assert_eq!(nav.current().screen, Screen::Auth);
        assert!(!flow.is_busy());
    }

    #[tokio::test]
    async fn transport_errors_are_reported() {
        let mut service = MockAccountService::new();
        service.expect_verify_token().returning(|_, _| {
            Err(ApiError::NotJson {
                status: 200,
                content_type: Some("text/html".into()),
            })
        });
        let mut nav = auth_stack();
        let mut flow = AuthFlow::new(Role::Student, Arc::from("app"), service);

        let err = flow.verify("tkn", &mut nav).await.expect_err("html");
        assert!(matches!(err, AuthFlowError::Api(ApiError::NotJson { .. })));
        assert!(matches!(flow.status(), AuthStatus::Failed(msg)
            if msg.contains("non-JSON")));
    }
}
