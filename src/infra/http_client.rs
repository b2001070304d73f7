use std::time::Duration;

use async_trait::async_trait;

use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::error::FetchError;

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let bytes = resp.bytes().await?.to_vec();
        Ok(HttpGetResult {
            status: status.as_u16(),
            reason,
            bytes,
        })
    }
}
