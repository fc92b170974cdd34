//! Team endpoints.

use crate::config::TEAMS_PATH;
use crate::error::Result;
use crate::models::records::{Page, PageQuery, Team};
use crate::transport::http::HttpClient;

pub async fn list(http: &HttpClient, query: &PageQuery) -> Result<Page<Team>> {
    let data = http.get(&format!("{}/admin/list", TEAMS_PATH), Some(query)).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn detail(http: &HttpClient, id: i64) -> Result<Team> {
    let data = http.get::<()>(&format!("{}/{}", TEAMS_PATH, id), None).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn create(http: &HttpClient, team: &Team) -> Result<serde_json::Value> {
    http.post(TEAMS_PATH, team).await
}

pub async fn update(http: &HttpClient, id: i64, team: &Team) -> Result<serde_json::Value> {
    http.put(&format!("{}/{}", TEAMS_PATH, id), team).await
}

/// Delete several teams at once; ids travel as a comma-joined query value.
pub async fn delete_batch(http: &HttpClient, ids: &[i64]) -> Result<serde_json::Value> {
    let joined = ids
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    http.delete(&format!("{}/remove/ids", TEAMS_PATH), Some(&[("ids", joined)]))
        .await
}
