pub const LOGIN_PATH: &str = "/admin/auth/login";
pub const REFRESH_PATH: &str = "/admin/auth/refresh";
pub const LOGOUT_PATH: &str = "/admin/auth/logout";

const AUTH_PATHS: [&str; 3] = [LOGIN_PATH, REFRESH_PATH, LOGOUT_PATH];

/// True for the endpoints that issue or revoke tokens. A 401 from one of
/// them must never trigger refresh-and-retry.
pub fn is_auth_endpoint(path_or_url: &str) -> bool {
    AUTH_PATHS.iter().any(|auth| path_or_url.contains(auth))
}
