use chrono::{Local, NaiveDate, Utc};
use futures::FutureExt;
use rust_decimal::Decimal;
use std::panic::{AssertUnwindSafe, resume_unwind};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::{CarrierError, Result};
use crate::labels::{decode_label, write_label};
use crate::messages::{Catalog, MessageId};
use crate::models::{
    BatchResult, CarrierApi, CarrierService, LabelRequest, PickingData, SentUpdate, ShipmentOut,
};
use crate::payload;
use crate::picking::{Connector, Picking};
use crate::store::ShipmentStore;

/// Sends outgoing shipments to ASM and fetches their labels.
pub struct AsmShipments {
    api: CarrierApi,
    connector: Arc<dyn Connector>,
    store: Arc<dyn ShipmentStore>,
    catalog: Catalog,
    database: String,
    label_dir: PathBuf,
    employee: Option<i64>,
}

impl AsmShipments {
    pub fn new(
        api: CarrierApi,
        connector: Arc<dyn Connector>,
        store: Arc<dyn ShipmentStore>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            api,
            connector,
            store,
            catalog: Catalog::default(),
            database: database.into(),
            label_dir: std::env::temp_dir(),
            employee: None,
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_label_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.label_dir = dir.into();
        self
    }

    /// Employee recorded as sender of the shipments.
    pub fn with_employee(mut self, employee: Option<i64>) -> Self {
        self.employee = employee;
        self
    }

    pub fn api(&self) -> &CarrierApi {
        &self.api
    }

    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) fn connector(&self) -> &dyn Connector {
        self.connector.as_ref()
    }

    /// ASM picking fields for `shipment`, dated today.
    pub fn picking_data(
        &self,
        shipment: &ShipmentOut,
        service: &CarrierService,
        price: Option<Decimal>,
        weight: bool,
    ) -> Option<PickingData> {
        let today = Local::now().date_naive();
        payload::picking_data(&self.api, shipment, service, price, weight, today)
    }

    /// Service for `shipment`: its own, else the carrier's, else the API default.
    pub fn resolve_service(&self, shipment: &ShipmentOut) -> Option<CarrierService> {
        shipment
            .carrier_service
            .clone()
            .or_else(|| shipment.carrier.service.clone())
            .or_else(|| self.api.default_service.clone())
    }

    /// Send `shipments` to ASM in one session.
    ///
    /// Each shipment succeeds or fails on its own; failures end up as
    /// messages in the returned errors. Only opening the session fails the
    /// whole batch.
    pub async fn send(&self, shipments: &[ShipmentOut]) -> Result<BatchResult> {
        let session = self.connector.open(&self.api).await?;

        let outcome = AssertUnwindSafe(async {
            let mut result = BatchResult::default();
            for shipment in shipments {
                self.send_shipment(session.as_ref(), shipment, &mut result).await;
            }
            result
        })
        .catch_unwind()
        .await;

        close_session(session.as_ref()).await;
        match outcome {
            Ok(done) => Ok(done),
            Err(panic) => resume_unwind(panic),
        }
    }

    async fn send_shipment(
        &self,
        session: &dyn Picking,
        shipment: &ShipmentOut,
        result: &mut BatchResult,
    ) {
        let name = shipment.rec_name();

        let Some(service) = self.resolve_service(shipment) else {
            let message = self.catalog.gettext(MessageId::AddServices, &[]);
            error!("{}", message);
            result.errors.push(message);
            return;
        };

        if shipment.delivery_address.country.as_deref().is_none_or(str::is_empty) {
            let message = self.catalog.gettext(MessageId::NotCountry, &[]);
            error!("{}", message);
            result.errors.push(message);
            return;
        }

        let mut price = None;
        if shipment.carrier_cashondelivery {
            price = match self.cash_on_delivery_price(shipment).await {
                Ok(price) => price,
                Err(e) => {
                    error!("Price of shipment {} could not be computed: {}", name, e);
                    None
                }
            };
            if price.is_none() {
                let message = self.catalog.gettext(MessageId::NotPrice, &[("name", name)]);
                error!("{}", message);
                result.errors.push(message);
                return;
            }
        }

        let Some(data) = self.picking_data(shipment, &service, price, self.api.weight) else {
            let message = self.catalog.gettext(MessageId::NotSenderAddress, &[("name", name)]);
            error!("{}", message);
            result.errors.push(message);
            return;
        };

        let picking = match session.create(&data).await {
            Ok(picking) => picking,
            Err(e) => {
                let message = self.catalog.gettext(
                    MessageId::NotSendError,
                    &[("name", name), ("error", e.to_string().as_str())],
                );
                error!("{}", message);
                result.errors.push(message);
                return;
            }
        };

        let reference = picking.reference.filter(|r| !r.is_empty());
        match &reference {
            Some(reference) => {
                let update = SentUpdate {
                    carrier_tracking_ref: reference.clone(),
                    carrier_service: service,
                    carrier_delivery: true,
                    carrier_send_date: Utc::now(),
                    carrier_send_employee: self.employee,
                };
                match self.store.write_sent(shipment.id, update).await {
                    Ok(()) => {
                        info!("Send shipment {}", shipment.number);
                        result.references.push(shipment.number.clone());
                    }
                    Err(e) => {
                        let message = self.catalog.gettext(
                            MessageId::NotSendError,
                            &[("name", name), ("error", e.to_string().as_str())],
                        );
                        error!("{}", message);
                        result.errors.push(message);
                    }
                }
            }
            None => error!("Not send shipment {}.", shipment.number),
        }

        let label = picking
            .label
            .filter(|label| !label.is_empty())
            .map(|label| self.store_label(&label, reference.as_deref().unwrap_or_default()));
        match label {
            Some(Ok(path)) => {
                info!("Generated tmp label {}", path.display());
                result.labels.push(path.display().to_string());
            }
            Some(Err(e)) => {
                error!("Label of shipment {} could not be saved: {}", name, e);
                let message = self.catalog.gettext(MessageId::NotLabel, &[("name", name)]);
                result.errors.push(message);
            }
            None => {
                let message = self.catalog.gettext(MessageId::NotLabel, &[("name", name)]);
                error!("{}", message);
                result.errors.push(message);
            }
        }

        if let Some(carrier_error) = picking.error.filter(|e| !e.is_empty()) {
            let message = self.catalog.gettext(
                MessageId::NotSendError,
                &[("name", name), ("error", carrier_error.as_str())],
            );
            error!("{}", message);
            result.errors.push(message);
        }
    }

    async fn cash_on_delivery_price(&self, shipment: &ShipmentOut) -> Result<Option<Decimal>> {
        match shipment.carrier_cashondelivery_price {
            Some(price) if !price.is_zero() => Ok(Some(price)),
            _ => self.store.cash_on_delivery_price(shipment).await,
        }
    }

    fn store_label(&self, label: &str, reference: &str) -> Result<PathBuf> {
        let pdf = decode_label(label)?;
        write_label(&self.label_dir, &self.database, reference, &pdf)
    }

    /// Fetch again the labels of shipments already sent to ASM.
    ///
    /// Shipments without a tracking reference, or whose label ASM no longer
    /// has, are skipped. Printed shipments keep the label bytes.
    pub async fn print_labels(&self, shipments: &[ShipmentOut]) -> Result<Vec<PathBuf>> {
        let session = self.connector.open(&self.api).await?;

        let outcome = AssertUnwindSafe(async {
            let mut labels = Vec::new();
            for shipment in shipments {
                if let Some(path) = self.print_label(session.as_ref(), shipment).await {
                    labels.push(path);
                }
            }
            labels
        })
        .catch_unwind()
        .await;

        close_session(session.as_ref()).await;
        match outcome {
            Ok(done) => Ok(done),
            Err(panic) => resume_unwind(panic),
        }
    }

    async fn print_label(&self, session: &dyn Picking, shipment: &ShipmentOut) -> Option<PathBuf> {
        let reference = shipment.carrier_tracking_ref.as_deref().filter(|r| !r.is_empty());
        let Some(reference) = reference else {
            error!("Shipment {} has not been sent by ASM.", shipment.number);
            return None;
        };

        let request = LabelRequest { codigo: reference.to_string() };
        let label = match session.label(&request).await {
            Ok(Some(label)) => label,
            Ok(None) => {
                error!("Label for shipment {} is not available from ASM.", shipment.number);
                return None;
            }
            Err(e) => {
                error!(
                    "Label for shipment {} could not be fetched from ASM: {}",
                    shipment.number, e
                );
                return None;
            }
        };

        let pdf = match decode_label(&label) {
            Ok(pdf) => pdf,
            Err(e) => {
                error!("Label for shipment {} is not valid: {}", shipment.number, e);
                return None;
            }
        };

        let path = match write_label(&self.label_dir, &self.database, reference, &pdf) {
            Ok(path) => path,
            Err(e) => {
                error!("Label for shipment {} could not be saved: {}", shipment.number, e);
                return None;
            }
        };
        info!("Generated tmp label {}", path.display());

        if let Err(e) = self.store.write_printed(shipment.id, pdf).await {
            error!("Shipment {} could not be marked as printed: {}", shipment.number, e);
        }

        Some(path)
    }

    /// End of day pickup manifest. ASM does not offer one.
    pub fn get_manifest(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Vec<u8>> {
        Err(CarrierError::User(self.catalog.gettext(MessageId::NotManifest, &[])))
    }
}

/// Release `session`, logging rather than failing when it cannot be closed.
pub(crate) async fn close_session(session: &dyn Picking) {
    if let Err(e) = session.close().await {
        warn!("Failed to close ASM session: {}", e);
    }
}
