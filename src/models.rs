use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::uom::WeightUnit;

/// Carrier API account settings for ASM
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarrierApi {
    pub username: String,
    /// Session timeout in seconds
    pub timeout: u64,
    pub debug: bool,
    pub default_service: Option<CarrierService>,
    /// Send the shipment weight with each picking
    pub weight: bool,
    /// Unit weights are recorded in when the shipment has none
    pub weight_unit: Option<WeightUnit>,
    /// Unit ASM expects weights in
    pub weight_api_unit: Option<WeightUnit>,
    /// Send the origin document name as reference instead of the shipment number
    pub reference_origin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarrierService {
    #[serde(default)]
    pub id: Option<i64>,
    pub code: String,
    #[serde(default)]
    pub name: String,
}

impl CarrierService {
    pub fn from_code(code: &str) -> Self {
        Self {
            id: None,
            code: code.to_string(),
            name: code.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Carrier {
    pub name: String,
    #[serde(default)]
    pub service: Option<CarrierService>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub subdivision: Option<String>,
    /// ISO country code
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// Tax identifier (NIF)
    #[serde(default)]
    pub identifier_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    pub party: Party,
}

/// Outgoing shipment as read from the ERP, with the tracking fields ASM fills in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipmentOut {
    pub id: i64,
    pub number: String,
    /// Name of the document that originated the shipment (e.g. a sale)
    #[serde(default)]
    pub origin: Option<String>,
    pub company: Company,
    #[serde(default)]
    pub warehouse_address: Option<Address>,
    pub customer: Party,
    pub delivery_address: Address,
    pub carrier: Carrier,
    #[serde(default)]
    pub carrier_service: Option<CarrierService>,
    #[serde(default)]
    pub carrier_cashondelivery: bool,
    #[serde(default)]
    pub carrier_cashondelivery_price: Option<Decimal>,
    #[serde(default)]
    pub number_packages: Option<u32>,
    /// Computed weight of the moves
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub weight_uom: Option<WeightUnit>,
    #[serde(default)]
    pub carrier_notes: Option<String>,
    #[serde(default)]
    pub asm_return: bool,
    #[serde(default)]
    pub carrier_tracking_ref: Option<String>,
    #[serde(default)]
    pub carrier_delivery: bool,
    #[serde(default)]
    pub carrier_send_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub carrier_send_employee: Option<i64>,
    #[serde(default)]
    pub carrier_printed: bool,
    #[serde(default, with = "label_bytes")]
    pub carrier_tracking_label: Option<Vec<u8>>,
}

impl ShipmentOut {
    pub fn rec_name(&self) -> &str {
        &self.number
    }

    /// Warehouse address, else the first address of the company.
    pub fn sender_address(&self) -> Option<&Address> {
        self.warehouse_address
            .as_ref()
            .or_else(|| self.company.party.addresses.first())
    }
}

/// Tracking fields written once ASM accepts a shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct SentUpdate {
    pub carrier_tracking_ref: String,
    pub carrier_service: CarrierService,
    pub carrier_delivery: bool,
    pub carrier_send_date: DateTime<Utc>,
    pub carrier_send_employee: Option<i64>,
}

/// Fields sent to ASM when creating a picking.
///
/// Keys follow the ASM picking schema; optional fields are left out of the
/// serialized payload when unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickingData {
    pub today: NaiveDate,
    pub bultos: u32,
    pub retorno: String,
    pub remite_nombre: String,
    pub remite_direccion: String,
    pub remite_poblacion: String,
    pub remite_provincia: String,
    pub remite_pais: Option<String>,
    pub remite_cp: String,
    pub remite_telefono: Option<String>,
    pub remite_email: Option<String>,
    pub remite_nif: Option<String>,
    pub destinatario_nombre: String,
    pub destinatario_direccion: String,
    pub destinatario_poblacion: String,
    pub destinatario_provincia: String,
    pub destinatario_pais: String,
    pub destinatario_cp: String,
    pub destinatario_telefono: Option<String>,
    pub destinatario_movil: Option<String>,
    pub destinatario_email: Option<String>,
    pub destinatario_observaciones: String,
    pub destinatario_att: String,
    pub referencia_c: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importes_reembolso: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso: Option<String>,
}

/// Request for a label already generated by ASM.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRequest {
    pub codigo: String,
}

/// Outcome of a batch submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchResult {
    /// Numbers of the shipments ASM accepted
    pub references: Vec<String>,
    /// Paths of the generated label files
    pub labels: Vec<String>,
    pub errors: Vec<String>,
}

/// Labels persisted as base64 so the JSON store stays readable.
mod label_bytes {
    use base64::{Engine as _, engine::general_purpose};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_some(&general_purpose::STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|value| general_purpose::STANDARD.decode(value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
