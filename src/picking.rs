use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CarrierApi, LabelRequest, PickingData};

/// What ASM answers to a picking creation. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickingResult {
    #[serde(default)]
    pub reference: Option<String>,
    /// Base64 encoded PDF
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Open ASM session.
#[async_trait]
pub trait Picking: Send + Sync {
    async fn create(&self, data: &PickingData) -> Result<PickingResult>;

    /// Base64 encoded label of an already created picking, if ASM has one.
    async fn label(&self, request: &LabelRequest) -> Result<Option<String>>;

    async fn test_connection(&self) -> Result<String>;

    /// Release the session. Called once per batch on every exit path.
    async fn close(&self) -> Result<()>;
}

/// Opens ASM sessions for an account.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn open(&self, api: &CarrierApi) -> Result<Box<dyn Picking>>;
}
