use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{CarrierError, Result};
use crate::models::{CarrierApi, LabelRequest, PickingData};
use crate::picking::{Connector, Picking, PickingResult};

/// Opens sessions on an HTTP gateway that fronts the ASM picking SDK.
pub struct GatewayConnector {
    base_url: String,
}

#[derive(Serialize)]
struct OpenRequest<'a> {
    username: &'a str,
    timeout: u64,
    debug: bool,
}

#[derive(Deserialize)]
struct OpenResponse {
    session: String,
}

#[derive(Serialize)]
struct SessionRequest<'a, T: Serialize> {
    session: &'a str,
    data: &'a T,
}

#[derive(Deserialize)]
struct LabelResponse {
    #[serde(default)]
    label: Option<String>,
}

#[derive(Deserialize)]
struct TestResponse {
    message: String,
}

impl GatewayConnector {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Connector for GatewayConnector {
    async fn open(&self, api: &CarrierApi) -> Result<Box<dyn Picking>> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(api.timeout.max(1)))
            .build()?;

        let url = format!("{}/session", self.base_url);
        let response = http_client
            .post(&url)
            .json(&OpenRequest {
                username: &api.username,
                timeout: api.timeout,
                debug: api.debug,
            })
            .send()
            .await?;

        let opened: OpenResponse = parse(response).await?;
        debug!(session = %opened.session, "Opened ASM session");

        Ok(Box::new(GatewayPicking {
            base_url: self.base_url.clone(),
            session: opened.session,
            http_client,
        }))
    }
}

pub struct GatewayPicking {
    base_url: String,
    session: String,
    http_client: Client,
}

impl GatewayPicking {
    async fn call<T: Serialize, R: DeserializeOwned>(&self, path: &str, data: &T) -> Result<R> {
        let url = format!("{}/picking/{}", self.base_url, path);

        let response = self.http_client
            .post(&url)
            .json(&SessionRequest { session: &self.session, data })
            .send()
            .await?;

        parse(response).await
    }
}

#[async_trait]
impl Picking for GatewayPicking {
    async fn create(&self, data: &PickingData) -> Result<PickingResult> {
        self.call("create", data).await
    }

    async fn label(&self, request: &LabelRequest) -> Result<Option<String>> {
        let response: LabelResponse = self.call("label", request).await?;
        Ok(response.label.filter(|label| !label.is_empty()))
    }

    async fn test_connection(&self) -> Result<String> {
        let response: TestResponse = self.call("test", &()).await?;
        Ok(response.message)
    }

    async fn close(&self) -> Result<()> {
        let url = format!("{}/session/{}", self.base_url, self.session);

        let response = self.http_client
            .delete(&url)
            .send()
            .await?;

        check(response).await?;
        debug!(session = %self.session, "Closed ASM session");
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(CarrierError::Gateway { status, body });
    }
    Ok(response)
}

async fn parse<R: DeserializeOwned>(response: Response) -> Result<R> {
    let response = check(response).await?;
    Ok(response.json().await?)
}
