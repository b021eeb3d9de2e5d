//! Route table and the guard that decides whether a route may be shown.
//!
//! The guard is a pure function of the current [`SessionSnapshot`] and the
//! requested path. Access is role based: public pages, pages for any
//! signed-in user, and staff pages. The global complaint queue only exists
//! under the staff route; `/complaints` (and its `/track` alias) is always
//! the signed-in user's own history.

use crate::session::SessionSnapshot;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Staff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    CreateComplaint,
    MyComplaints,
    ComplaintDetail(u64),
    Feedback,
    Admin,
}

impl Route {
    /// Resolve a location (path plus optional query/fragment) to a route.
    pub fn parse(location: &str) -> Option<Self> {
        let path = location
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Self::Home,
            ["login"] | ["auth"] => Self::Login,
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["reset-password"] => Self::ResetPassword,
            ["create"] => Self::CreateComplaint,
            ["complaints"] | ["track"] => Self::MyComplaints,
            ["complaints", id] => match id.parse::<u64>() {
                Ok(id) if id > 0 => Self::ComplaintDetail(id),
                _ => return None,
            },
            ["feedback"] => Self::Feedback,
            ["admin"] => Self::Admin,
            _ => return None,
        };
        Some(route)
    }

    pub fn access(self) -> Access {
        match self {
            Self::Login | Self::Register | Self::ForgotPassword | Self::ResetPassword => {
                Access::Public
            }
            Self::Admin => Access::Staff,
            Self::Home
            | Self::CreateComplaint
            | Self::MyComplaints
            | Self::ComplaintDetail(_)
            | Self::Feedback => Access::Authenticated,
        }
    }

    /// Canonical path for this route.
    pub fn path(self) -> String {
        match self {
            Self::Home => HOME_PATH.to_string(),
            Self::Login => LOGIN_PATH.to_string(),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::ResetPassword => "/reset-password".to_string(),
            Self::CreateComplaint => "/create".to_string(),
            Self::MyComplaints => "/complaints".to_string(),
            Self::ComplaintDetail(id) => format!("/complaints/{id}"),
            Self::Feedback => "/feedback".to_string(),
            Self::Admin => "/admin".to_string(),
        }
    }

    /// Sign-in and sign-up pages make no sense once signed in.
    fn is_auth_entry(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect { to: String, from: Option<String> },
    NotFound,
}

pub fn guard(session: &SessionSnapshot, location: &str) -> GuardDecision {
    let Some(route) = Route::parse(location) else {
        return GuardDecision::NotFound;
    };

    match route.access() {
        Access::Public if session.is_signed_in() && route.is_auth_entry() => {
            GuardDecision::Redirect {
                to: HOME_PATH.to_string(),
                from: None,
            }
        }
        Access::Public => GuardDecision::Render(route),
        _ if !session.is_signed_in() => GuardDecision::Redirect {
            to: LOGIN_PATH.to_string(),
            from: Some(location.to_string()),
        },
        Access::Staff if !session.is_admin => GuardDecision::Redirect {
            to: HOME_PATH.to_string(),
            from: None,
        },
        _ => GuardDecision::Render(route),
    }
}

/// Where to go after signing in: back to `from` if it names a protected
/// in-app page, home otherwise.
pub fn post_login_target(from: Option<&str>) -> String {
    let Some(from) = from else {
        return HOME_PATH.to_string();
    };
    if !from.starts_with('/') || from.starts_with("//") {
        return HOME_PATH.to_string();
    }
    match Route::parse(from) {
        Some(route) if route.access() != Access::Public => from.to_string(),
        _ => HOME_PATH.to_string(),
    }
}
