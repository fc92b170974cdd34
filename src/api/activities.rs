//! Activity endpoints.

use crate::config::ACTIVITIES_PATH;
use crate::error::Result;
use crate::models::records::{Activity, Page, PageQuery};
use crate::transport::http::HttpClient;

pub async fn list(http: &HttpClient, query: &PageQuery) -> Result<Page<Activity>> {
    let data = http.get(&format!("{}/list", ACTIVITIES_PATH), Some(query)).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn detail(http: &HttpClient, id: i64) -> Result<Activity> {
    let data = http.get::<()>(&format!("{}/{}", ACTIVITIES_PATH, id), None).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn create(http: &HttpClient, activity: &Activity) -> Result<serde_json::Value> {
    http.post(ACTIVITIES_PATH, activity).await
}

pub async fn update(http: &HttpClient, id: i64, activity: &Activity) -> Result<serde_json::Value> {
    http.put(&format!("{}/{}", ACTIVITIES_PATH, id), activity).await
}

pub async fn delete(http: &HttpClient, id: i64) -> Result<serde_json::Value> {
    http.delete::<()>(&format!("{}/{}", ACTIVITIES_PATH, id), None).await
}

/// Shelve or unshelve an activity.
pub async fn set_status(http: &HttpClient, id: i64, is_active: bool) -> Result<serde_json::Value> {
    http.put(
        &format!("{}/status/{}", ACTIVITIES_PATH, id),
        &serde_json::json!({ "isActive": is_active }),
    )
    .await
}
