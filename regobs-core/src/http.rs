use crate::{
    connection::{ApiResponse, Headers, Transport},
    error::Result,
};
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// [`Transport`] over HTTPS with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn send(request: RequestBuilder, headers: &Headers) -> Result<ApiResponse> {
        let request = headers
            .iter()
            .fold(request, |request, (name, value)| request.header(*name, value));
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Response {}: {} bytes", status, body.len());
        Ok(ApiResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: &Headers) -> Result<ApiResponse> {
        debug!("GET {}", url);
        Self::send(self.client.get(url), headers).await
    }

    async fn post_json(&self, url: &str, headers: &Headers, body: &Value) -> Result<ApiResponse> {
        debug!("POST {}", url);
        Self::send(self.client.post(url).json(body), headers).await
    }
}
