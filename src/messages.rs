use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Es,
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en_us" | "en_gb" => Ok(Lang::En),
            "es" | "es_es" | "ca" => Ok(Lang::Es),
            other => Err(format!("unsupported language {:?}", other)),
        }
    }
}

/// Symbolic identifiers of user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    AddServices,
    NotCountry,
    NotPrice,
    NotSenderAddress,
    NotLabel,
    NotSendError,
    NotManifest,
    ConnectionUnknown,
}

impl MessageId {
    fn template(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (MessageId::AddServices, Lang::En) => "Select a service or default service in ASM API.",
            (MessageId::AddServices, Lang::Es) => {
                "Seleccione un servicio o un servicio por defecto en la API de ASM."
            }
            (MessageId::NotCountry, Lang::En) => "Add a country in the delivery address.",
            (MessageId::NotCountry, Lang::Es) => "Añada un país en la dirección de entrega.",
            (MessageId::NotPrice, Lang::En) => {
                "Shipment \"{name}\" does not have a cash on delivery price."
            }
            (MessageId::NotPrice, Lang::Es) => {
                "El albarán \"{name}\" no tiene importe de reembolso."
            }
            (MessageId::NotSenderAddress, Lang::En) => {
                "Shipment \"{name}\" has no warehouse or company address."
            }
            (MessageId::NotSenderAddress, Lang::Es) => {
                "El albarán \"{name}\" no tiene dirección de almacén ni de empresa."
            }
            (MessageId::NotLabel, Lang::En) => "Not available \"{name}\" label from ASM.",
            (MessageId::NotLabel, Lang::Es) => {
                "La etiqueta del albarán \"{name}\" no está disponible en ASM."
            }
            (MessageId::NotSendError, Lang::En) => "Not send shipment {name}. {error}",
            (MessageId::NotSendError, Lang::Es) => "No se ha enviado el albarán {name}. {error}",
            (MessageId::NotManifest, Lang::En) => "ASM Manifest service is not available.",
            (MessageId::NotManifest, Lang::Es) => {
                "El servicio de manifiesto de ASM no está disponible."
            }
            (MessageId::ConnectionUnknown, Lang::En) => "Connection unknown result",
            (MessageId::ConnectionUnknown, Lang::Es) => "Resultado de conexión desconocido",
        }
    }
}

/// Localized message catalog with `{param}` substitution.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    lang: Lang,
}

impl Default for Catalog {
    fn default() -> Self {
        Self { lang: Lang::En }
    }
}

impl Catalog {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    /// Message text with each `{param}` of the template replaced once.
    ///
    /// Placeholders without a matching param are kept as they are.
    pub fn gettext(&self, id: MessageId, params: &[(&str, &str)]) -> String {
        let mut text = String::new();
        let mut rest = id.template(self.lang);

        while let Some(open) = rest.find('{') {
            text.push_str(&rest[..open]);
            let Some(len) = rest[open..].find('}') else {
                rest = &rest[open..];
                break;
            };
            let placeholder = &rest[open..open + len + 1];
            let name = &placeholder[1..placeholder.len() - 1];
            match params.iter().find(|(param, _)| *param == name) {
                Some((_, value)) => text.push_str(value),
                None => text.push_str(placeholder),
            }
            rest = &rest[open + len + 1..];
        }

        text.push_str(rest);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_named_params() {
        let catalog = Catalog::default();
        let message = catalog.gettext(
            MessageId::NotSendError,
            &[("name", "OUT/0001"), ("error", "bad zip")],
        );
        assert_eq!(message, "Not send shipment OUT/0001. bad zip");
    }

    #[test]
    fn spanish_catalog() {
        let catalog = Catalog::new(Lang::Es);
        assert_eq!(
            catalog.gettext(MessageId::NotPrice, &[("name", "OUT/7")]),
            "El albarán \"OUT/7\" no tiene importe de reembolso."
        );
    }

    #[test]
    fn values_are_not_substituted_again() {
        let catalog = Catalog::default();
        let message = catalog.gettext(
            MessageId::NotSendError,
            &[("name", "OUT/{error}"), ("error", "bad zip")],
        );
        assert_eq!(message, "Not send shipment OUT/{error}. bad zip");
    }

    #[test]
    fn missing_params_keep_placeholder() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.gettext(MessageId::NotPrice, &[]),
            "Shipment \"{name}\" does not have a cash on delivery price."
        );
    }

    #[test]
    fn unused_params_are_ignored() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.gettext(MessageId::NotCountry, &[("zip", "46001")]),
            "Add a country in the delivery address."
        );
    }
}
