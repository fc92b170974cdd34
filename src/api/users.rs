//! Admin user endpoints.

use crate::config::USERS_PATH;
use crate::error::Result;
use crate::models::records::{Page, PageQuery, User};
use crate::transport::http::HttpClient;

pub async fn list(http: &HttpClient, query: &PageQuery) -> Result<Page<User>> {
    let data = http.get(USERS_PATH, Some(query)).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn detail(http: &HttpClient, id: i64) -> Result<User> {
    let data = http.get::<()>(&format!("{}/{}", USERS_PATH, id), None).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn create(http: &HttpClient, user: &User) -> Result<serde_json::Value> {
    http.post(USERS_PATH, user).await
}

pub async fn update(http: &HttpClient, id: i64, user: &User) -> Result<serde_json::Value> {
    http.put(&format!("{}/{}", USERS_PATH, id), user).await
}

pub async fn delete(http: &HttpClient, id: i64) -> Result<serde_json::Value> {
    http.delete::<()>(&format!("{}/{}", USERS_PATH, id), None).await
}
