use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;

use crate::error::{CarrierError, Result};
use crate::models::{SentUpdate, ShipmentOut};

/// Persistence of the shipment fields ASM reads and writes.
#[async_trait]
pub trait ShipmentStore: Send + Sync {
    /// Amount to collect on delivery, when it can be computed.
    async fn cash_on_delivery_price(&self, shipment: &ShipmentOut) -> Result<Option<Decimal>>;

    async fn write_sent(&self, shipment_id: i64, update: SentUpdate) -> Result<()>;

    async fn write_printed(&self, shipment_id: i64, label: Vec<u8>) -> Result<()>;
}

/// In-memory store, optionally loaded from and saved to a JSON file.
#[derive(Default)]
pub struct MemoryStore {
    shipments: RwLock<BTreeMap<i64, ShipmentOut>>,
}

impl MemoryStore {
    pub fn new(shipments: Vec<ShipmentOut>) -> Self {
        Self {
            shipments: RwLock::new(shipments.into_iter().map(|s| (s.id, s)).collect()),
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read(path).await?;
        let shipments: Vec<ShipmentOut> = serde_json::from_slice(&raw)?;
        Ok(Self::new(shipments))
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let shipments = self.all().await;
        let raw = serde_json::to_vec_pretty(&shipments)?;
        tokio::fs::write(path, raw).await?;
        Ok(())
    }

    pub async fn get(&self, shipment_id: i64) -> Option<ShipmentOut> {
        self.shipments.read().await.get(&shipment_id).cloned()
    }

    pub async fn all(&self) -> Vec<ShipmentOut> {
        self.shipments.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl ShipmentStore for MemoryStore {
    async fn cash_on_delivery_price(&self, shipment: &ShipmentOut) -> Result<Option<Decimal>> {
        let shipments = self.shipments.read().await;
        Ok(shipments
            .get(&shipment.id)
            .and_then(|stored| stored.carrier_cashondelivery_price)
            .filter(|price| !price.is_zero()))
    }

    async fn write_sent(&self, shipment_id: i64, update: SentUpdate) -> Result<()> {
        let mut shipments = self.shipments.write().await;
        let shipment = shipments
            .get_mut(&shipment_id)
            .ok_or_else(|| CarrierError::Store(format!("shipment {} not found", shipment_id)))?;

        shipment.carrier_tracking_ref = Some(update.carrier_tracking_ref);
        shipment.carrier_service = Some(update.carrier_service);
        shipment.carrier_delivery = update.carrier_delivery;
        shipment.carrier_send_date = Some(update.carrier_send_date);
        shipment.carrier_send_employee = update.carrier_send_employee;
        Ok(())
    }

    async fn write_printed(&self, shipment_id: i64, label: Vec<u8>) -> Result<()> {
        let mut shipments = self.shipments.write().await;
        let shipment = shipments
            .get_mut(&shipment_id)
            .ok_or_else(|| CarrierError::Store(format!("shipment {} not found", shipment_id)))?;

        shipment.carrier_printed = true;
        shipment.carrier_tracking_label = Some(label);
        Ok(())
    }
}
