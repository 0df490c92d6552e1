use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{CarrierApi, CarrierService, PickingData, ShipmentOut};
use crate::services;
use crate::text::{unaccent, unaccent_opt};
use crate::uom::compute_qty;

/// Build the ASM picking fields of a shipment.
///
/// Returns `None` when the shipment has neither a warehouse address nor a
/// company address to send from.
pub fn picking_data(
    api: &CarrierApi,
    shipment: &ShipmentOut,
    service: &CarrierService,
    price: Option<Decimal>,
    weight: bool,
    today: NaiveDate,
) -> Option<PickingData> {
    let sender = shipment.sender_address()?;
    let company = &shipment.company.party;
    let customer = &shipment.customer;
    let delivery = &shipment.delivery_address;

    let packages = match shipment.number_packages {
        Some(packages) if packages > 0 => packages,
        _ => 1,
    };

    let reference = match (&shipment.origin, api.reference_origin) {
        (Some(origin), true) if !origin.is_empty() => origin.clone(),
        _ => shipment.number.clone(),
    };

    let notes = match shipment.carrier_notes.as_deref() {
        Some(notes) if !notes.is_empty() => format!("{}\n", notes),
        _ => String::new(),
    };

    let asm_service = services::lookup(&service.code);

    let importes_reembolso = if shipment.carrier_cashondelivery {
        price.filter(|price| !price.is_zero()).map(|price| price.to_string())
    } else {
        None
    };

    let peso = if weight {
        shipment.weight.map(|computed| {
            let mut weight = if computed == 0.0 { 1.0 } else { computed };
            if let Some(api_unit) = api.weight_api_unit {
                if let Some(unit) = shipment.weight_uom.or(api.weight_unit) {
                    weight = compute_qty(unit, weight, api_unit);
                }
            }
            weight.to_string()
        })
    } else {
        None
    };

    Some(PickingData {
        today,
        bultos: packages,
        retorno: if shipment.asm_return { "1" } else { "0" }.to_string(),
        remite_nombre: company.name.clone(),
        remite_direccion: unaccent(&sender.street),
        remite_poblacion: unaccent(&sender.city),
        remite_provincia: unaccent_opt(sender.subdivision.as_deref()),
        remite_pais: sender.country.clone(),
        remite_cp: sender.zip.clone(),
        remite_telefono: company.phone.clone(),
        remite_email: company.email.clone(),
        remite_nif: company.identifier_code.clone(),
        destinatario_nombre: unaccent(&customer.name),
        destinatario_direccion: unaccent(&delivery.street),
        destinatario_poblacion: unaccent(&delivery.city),
        destinatario_provincia: unaccent_opt(delivery.subdivision.as_deref()),
        destinatario_pais: delivery.country.clone().unwrap_or_default(),
        destinatario_cp: delivery.zip.clone(),
        destinatario_telefono: most_specific(&delivery.phone, &customer.phone),
        destinatario_movil: most_specific(&delivery.mobile, &customer.mobile),
        destinatario_email: most_specific(&delivery.email, &customer.email),
        destinatario_observaciones: unaccent(&notes),
        destinatario_att: unaccent(
            delivery
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or(&customer.name),
        ),
        referencia_c: reference,
        servicio: asm_service.map(|s| s.servicio.to_string()),
        horario: asm_service.map(|s| s.horario.to_string()),
        importes_reembolso,
        peso,
    })
}

fn most_specific(address_value: &Option<String>, party_value: &Option<String>) -> Option<String> {
    address_value
        .as_ref()
        .filter(|value| !value.is_empty())
        .or(party_value.as_ref())
        .cloned()
}
