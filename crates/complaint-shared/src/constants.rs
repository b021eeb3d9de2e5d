/// Application name
pub const APP_NAME: &str = "Complaint Hub";

/// Scheme used in the `Authorization` header (`Token <token>`)
pub const AUTH_SCHEME: &str = "Token";

/// Durable storage keys for the session
pub const KEY_TOKEN: &str = "complaint_token";
pub const KEY_IS_ADMIN: &str = "complaint_is_admin";
pub const KEY_DISPLAY_IDENTIFIER: &str = "complaint_display_identifier";

/// Backend endpoints, relative to the configured base URL
pub const PATH_LOGIN: &str = "auth/login/";
pub const PATH_REGISTER: &str = "auth/register/";
pub const PATH_PASSWORD_RESET: &str = "auth/password/reset/";
pub const PATH_PASSWORD_RESET_CONFIRM: &str = "auth/password/reset/confirm/";
pub const PATH_COMPLAINTS: &str = "complaints/";
pub const PATH_ADMIN_COMPLAINTS: &str = "admin/complaints/";
pub const PATH_ADMIN_RESPONSE: &str = "admin/response/";
pub const PATH_FEEDBACK: &str = "feedback/";

/// Default backend base URL for local development
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";

/// Registration and password reset only accept these email domains by default
pub const DEFAULT_EMAIL_DOMAIN: &str = "astanait.edu.kz";

/// Minimum complaint text length (after trimming)
pub const MIN_COMPLAINT_LENGTH: usize = 10;

/// Minimum password length for registration and reset
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Category shown for complaints without one
pub const GENERAL_CATEGORY: &str = "general";
