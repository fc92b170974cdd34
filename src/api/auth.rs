//! Login, logout, and profile endpoints.

use crate::error::Result;
use crate::models::auth::{AdminProfile, LoginRequest, LoginResponse};
use crate::transport::http::HttpClient;

/// Exchange credentials for a bearer token. The login path varies between
/// deployments, so it is passed in rather than fixed here.
pub async fn login(http: &HttpClient, path: &str, request: &LoginRequest) -> Result<LoginResponse> {
    let data = http.post(path, request).await?;
    Ok(serde_json::from_value(data)?)
}

/// Invalidate the session server-side.
pub async fn logout(http: &HttpClient) -> Result<()> {
    http.post_empty(crate::config::LOGOUT_PATH).await?;
    Ok(())
}

/// Fetch the signed-in administrator's profile.
pub async fn get_profile(http: &HttpClient) -> Result<AdminProfile> {
    let data = http.get::<()>(crate::config::PROFILE_PATH, None).await?;
    Ok(serde_json::from_value(data)?)
}
