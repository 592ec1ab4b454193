use std::time::Instant;
use tracing::{debug, info, warn};

use crate::api::{ApiError, HealthStatus};
use crate::config::Config;
use crate::session::dashboard::{Dashboard, DashboardSettings};
use crate::session::request::Completion;
use crate::session::toast::Toast;
use crate::types::profile::UserProfile;

pub const LOGIN_INCOMPLETE: &str = "Please fill all fields!";

/// Entry form on the home screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub name: String,
    pub location: String,
    pub crop_type: String,
}

impl LoginForm {
    pub fn submit(&self) -> Result<UserProfile, &'static str> {
        let name = self.name.trim();
        let location = self.location.trim();
        let crop_type = self.crop_type.trim();
        if name.is_empty() || location.is_empty() || crop_type.is_empty() {
            return Err(LOGIN_INCOMPLETE);
        }
        Ok(UserProfile::new(name, location, crop_type))
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Home(LoginForm),
    Dashboard(Box<Dashboard>),
}

/// Last answer from `/health`, shown in the side panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Reachable(HealthStatus),
    Unreachable(String),
}

/// Mutable view of the controller handed to the drawing code.
pub struct ViewState<'a> {
    pub screen: &'a mut Screen,
    pub toast: &'a mut Toast,
    pub profile: Option<&'a UserProfile>,
    pub backend: &'a BackendStatus,
}

/// Owns the profile, the notification slot and whichever screen is showing.
pub struct RootController {
    screen: Screen,
    profile: Option<UserProfile>,
    toast: Toast,
    settings: DashboardSettings,
    backend: BackendStatus,
}

impl RootController {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            screen: Screen::Home(LoginForm::default()),
            profile: None,
            toast: Toast::new(),
            settings,
            backend: BackendStatus::Unknown,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(DashboardSettings {
            session_id: config.session_id.clone(),
            default_city: config.default_city.clone(),
            navigate_to_results: config.navigate_to_results,
        })
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn toast_mut(&mut self) -> &mut Toast {
        &mut self.toast
    }

    pub fn backend_status(&self) -> &BackendStatus {
        &self.backend
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.screen {
            Screen::Dashboard(dashboard) => Some(&**dashboard),
            Screen::Home(_) => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut Dashboard> {
        match &mut self.screen {
            Screen::Dashboard(dashboard) => Some(&mut **dashboard),
            Screen::Home(_) => None,
        }
    }

    pub fn view_state(&mut self) -> ViewState<'_> {
        ViewState {
            screen: &mut self.screen,
            toast: &mut self.toast,
            profile: self.profile.as_ref(),
            backend: &self.backend,
        }
    }

    /// Stores the profile and opens the dashboard on its overview tab.
    pub fn login(&mut self, profile: UserProfile) {
        info!(farmer = %profile.name, location = %profile.location, crop = %profile.crop_type, "logged in");
        self.screen = Screen::Dashboard(Box::new(Dashboard::new(&profile, &self.settings)));
        self.profile = Some(profile);
        self.toast.dismiss();
    }

    /// Validates the home form. Returns true when the dashboard opened.
    pub fn submit_login(&mut self, now: Instant) -> bool {
        let Screen::Home(form) = &self.screen else {
            return false;
        };
        match form.submit() {
            Ok(profile) => {
                self.login(profile);
                true
            }
            Err(message) => {
                self.toast.show(message, now);
                false
            }
        }
    }

    /// Drops the profile and every piece of dashboard state.
    pub fn logout(&mut self) {
        if let Some(profile) = self.profile.take() {
            info!(farmer = %profile.name, "logged out");
        }
        self.screen = Screen::Home(LoginForm::default());
        self.toast.dismiss();
    }

    pub fn apply(&mut self, completion: Completion, now: Instant) {
        if let Completion::Health(result) = completion {
            self.apply_health(result);
            return;
        }
        match &mut self.screen {
            Screen::Dashboard(dashboard) => dashboard.apply(completion, &mut self.toast, now),
            Screen::Home(_) => debug!(?completion, "dropping completion after logout"),
        }
    }

    fn apply_health(&mut self, result: Result<HealthStatus, ApiError>) {
        self.backend = match result {
            Ok(status) => {
                if !status.is_healthy() {
                    warn!(status = %status.status, "backend reports degraded health");
                }
                BackendStatus::Reachable(status)
            }
            Err(err) => {
                warn!(error = %err, "backend health check failed");
                BackendStatus::Unreachable(err.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::mock_analysis;
    use crate::session::navigation::Tab;

    fn controller() -> RootController {
        RootController::new(DashboardSettings::default())
    }

    fn fill(controller: &mut RootController, name: &str, location: &str, crop: &str) {
        if let Screen::Home(form) = &mut controller.screen {
            form.name = name.to_string();
            form.location = location.to_string();
            form.crop_type = crop.to_string();
        }
    }

    #[test]
    fn incomplete_login_stays_home() {
        let now = Instant::now();
        let mut root = controller();
        fill(&mut root, "Asha", "  ", "wheat");
        assert!(!root.submit_login(now));
        assert!(matches!(root.screen(), Screen::Home(_)));
        assert_eq!(root.toast().message(), Some(LOGIN_INCOMPLETE));
        assert!(root.profile().is_none());
    }

    #[test]
    fn login_opens_overview_with_trimmed_profile() {
        let now = Instant::now();
        let mut root = controller();
        fill(&mut root, " Asha ", "Thane", "wheat");
        assert!(root.submit_login(now));
        assert_eq!(root.profile(), Some(&UserProfile::new("Asha", "Thane", "wheat")));
        assert_eq!(root.dashboard().map(|d| d.tab()), Some(Tab::Overview));
    }

    #[test]
    fn logout_discards_dashboard_state() {
        let now = Instant::now();
        let mut root = controller();
        root.login(UserProfile::new("Asha", "Thane", "wheat"));
        root.apply(Completion::Analysis(Ok(mock_analysis(Some("wheat"), "Thane"))), now);
        assert!(root.dashboard().and_then(|d| d.analysis()).is_some());

        root.logout();
        assert!(root.profile().is_none());
        assert!(matches!(root.screen(), Screen::Home(form) if *form == LoginForm::default()));

        root.login(UserProfile::new("Ravi", "Pune", "rice"));
        let dashboard = root.dashboard().unwrap();
        assert!(dashboard.analysis().is_none());
        assert!(dashboard.chat.log().is_empty());
        assert_eq!(dashboard.tab(), Tab::Overview);
    }

    #[test]
    fn late_completion_after_logout_is_dropped() {
        let now = Instant::now();
        let mut root = controller();
        root.login(UserProfile::new("Asha", "Thane", "wheat"));
        root.logout();
        root.apply(Completion::Analysis(Err(ApiError::Transport("refused".into()))), now);
        assert_eq!(root.toast().message(), None);
    }

    #[test]
    fn health_result_is_recorded() {
        let now = Instant::now();
        let mut root = controller();
        root.apply(Completion::Health(Err(ApiError::Transport("connection refused".into()))), now);
        assert_eq!(root.backend_status(), &BackendStatus::Unreachable("connection refused".into()));
    }
}
