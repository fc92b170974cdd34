//! Participation record (order) endpoints.

use crate::config::ORDERS_PATH;
use crate::error::Result;
use crate::models::records::{Order, Page, PageQuery};
use crate::transport::http::HttpClient;

pub async fn list(http: &HttpClient, query: &PageQuery) -> Result<Page<Order>> {
    let data = http.get(&format!("{}/admin/list", ORDERS_PATH), Some(query)).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn detail(http: &HttpClient, id: i64) -> Result<Order> {
    let data = http.get::<()>(&format!("{}/{}", ORDERS_PATH, id), None).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn create(http: &HttpClient, order: &Order) -> Result<serde_json::Value> {
    http.post(&format!("{}/save", ORDERS_PATH), order).await
}

pub async fn create_batch(http: &HttpClient, orders: &[Order]) -> Result<serde_json::Value> {
    http.post(&format!("{}/save/batch", ORDERS_PATH), orders).await
}

pub async fn update(http: &HttpClient, id: i64, order: &Order) -> Result<serde_json::Value> {
    http.put(&format!("{}/{}", ORDERS_PATH, id), order).await
}

pub async fn delete(http: &HttpClient, id: i64) -> Result<serde_json::Value> {
    http.delete::<()>(&format!("{}/{}", ORDERS_PATH, id), None).await
}
