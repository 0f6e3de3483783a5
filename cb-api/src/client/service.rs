use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::Health;

/// retrieves the welcome message of the server
pub async fn greeting(client: &ApiClient) -> Result<String, RequestError> {
    let res = client.get("/api/greeting")?.send().await?;
    let res = RequestError::check(res).await?;

    Ok(res.text().await?)
}

/// retrieves the health status of the server
pub async fn health(client: &ApiClient) -> Result<Health, RequestError> {
    let res = client.get("/api/health")?.send().await?;
    let res = RequestError::check(res).await?;

    Ok(res.json().await?)
}
