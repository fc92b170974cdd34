//! Configuration constants and endpoint paths for the console API.

use std::time::Duration;

/// Connect timeout for HTTP requests.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Total timeout per request. The console backend answers fast or not at all.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delay before redirecting to login after a session-invalidating error.
///
/// The delay lets the surfaced error message stay visible, and lets
/// concurrently in-flight requests finish their own classification before
/// navigation happens.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Embedded envelope code that marks a successful business response.
pub const CODE_SUCCESS: i64 = 200;

/// Embedded envelope code that marks an unauthenticated session.
///
/// Distinct signal from HTTP 401: the backend reports expired sessions inside
/// a 2xx envelope. Both must trigger identical recovery.
pub const CODE_UNAUTHENTICATED: i64 = 401;

/// Default login endpoint path. Deployments with a versioned admin login
/// route override this on the client builder.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";

/// Logout endpoint path.
pub const LOGOUT_PATH: &str = "/auth/logout";

/// Current-admin profile endpoint path.
pub const PROFILE_PATH: &str = "/auth/info";

/// Admin user resource path.
pub const USERS_PATH: &str = "/api/v1/admin/users";

/// Activity resource path.
pub const ACTIVITIES_PATH: &str = "/product";

/// Order (participation record) resource path.
pub const ORDERS_PATH: &str = "/product_order";

/// Team resource path.
pub const TEAMS_PATH: &str = "/product_cart";

/// Session file name under the user config directory.
pub const SESSION_FILE: &str = "session.json";

/// Directory name under the user config directory.
pub const CONFIG_DIR: &str = "console-client";

/// Join a base URL and a path without doubling or dropping the separator.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_variants() {
        assert_eq!(join_url("http://host", "/auth/login"), "http://host/auth/login");
        assert_eq!(join_url("http://host/", "auth/login"), "http://host/auth/login");
        assert_eq!(join_url("http://host/", "/auth/login"), "http://host/auth/login");
        assert_eq!(join_url("http://host", "auth/login"), "http://host/auth/login");
    }

    #[test]
    fn test_sentinels_are_distinct_from_http_semantics() {
        // The embedded codes happen to mirror HTTP numbers but are matched
        // against the envelope, never against the transport status.
        assert_eq!(CODE_SUCCESS, 200);
        assert_eq!(CODE_UNAUTHENTICATED, 401);
    }
}
