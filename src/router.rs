use crate::guard::Access;

/// Paths used as guard redirect targets.
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Route
///
/// The declarative route surface: every URL path maps to exactly one variant,
/// with unmatched paths collapsing into `NotFound`. Pages themselves are
/// external collaborators; the router only decides *which* page a path means
/// and what access it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Login,
    Signup,
    Apps,
    /// `/apps/:id` — detail view for one catalog record.
    AppDetail(String),
    Settings,
    SettingsDeployment,
    SettingsAuth,
    SettingsAdmin,
    /// Catch-all for unmatched URLs.
    NotFound,
}

impl Route {
    /// resolve
    ///
    /// Maps a URL path to its route. Trailing slashes are tolerated; query
    /// strings are not part of the surface and everything unrecognized is the
    /// not-found page.
    pub fn resolve(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["about"] => Self::About,
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["apps"] => Self::Apps,
            ["apps", id] => Self::AppDetail((*id).to_string()),
            ["settings"] => Self::Settings,
            ["settings", "deployment"] => Self::SettingsDeployment,
            ["settings", "auth"] => Self::SettingsAuth,
            ["settings", "admin"] => Self::SettingsAdmin,
            _ => Self::NotFound,
        }
    }

    /// The guard requirement for this route. The settings tree requires a
    /// session throughout, with the admin panel additionally requiring the
    /// admin role; the auth entry points and the not-found page stay public.
    pub fn access(&self) -> Access {
        match self {
            Self::Home | Self::About | Self::Login | Self::Signup | Self::NotFound => {
                Access::Public
            }
            Self::Apps
            | Self::AppDetail(_)
            | Self::Settings
            | Self::SettingsDeployment
            | Self::SettingsAuth => Access::Authenticated,
            Self::SettingsAdmin => Access::Admin,
        }
    }

    /// The canonical path for a route, for link rendering and history entries.
    pub fn path(&self) -> String {
        match self {
            Self::Home => HOME_PATH.to_string(),
            Self::About => "/about".to_string(),
            Self::Login => LOGIN_PATH.to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Apps => "/apps".to_string(),
            Self::AppDetail(id) => format!("/apps/{id}"),
            Self::Settings => "/settings".to_string(),
            Self::SettingsDeployment => "/settings/deployment".to_string(),
            Self::SettingsAuth => "/settings/auth".to_string(),
            Self::SettingsAdmin => "/settings/admin".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }
}
