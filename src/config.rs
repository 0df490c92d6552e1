use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;

use crate::messages::Lang;
use crate::models::{CarrierApi, CarrierService};
use crate::uom::WeightUnit;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api: CarrierApi,
    pub gateway_url: String,
    pub database_name: String,
    pub label_dir: Option<PathBuf>,
    pub lang: Lang,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `ASM_USERNAME`: Required - ASM account name
    /// - `ASM_GATEWAY_URL`: Required - Picking gateway endpoint
    /// - `ASM_TIMEOUT`: Optional - Session timeout in seconds (default: 30)
    /// - `ASM_DEBUG`: Optional - Carrier debug mode (default: false)
    /// - `ASM_DEFAULT_SERVICE`: Optional - Default service code
    /// - `ASM_WEIGHT`: Optional - Send shipment weight (default: false)
    /// - `ASM_WEIGHT_UNIT`: Optional - Unit weights are recorded in (`g`, `kg`, `lb`, `oz`)
    /// - `ASM_WEIGHT_API_UNIT`: Optional - Unit ASM expects weights in
    /// - `ASM_REFERENCE_ORIGIN`: Optional - Use origin document as reference (default: false)
    /// - `DATABASE_NAME`: Optional - Prefix for label files (default: "erp")
    /// - `ASM_LABEL_DIR`: Optional - Directory for label files (default: system temp dir)
    /// - `ASM_LANG`: Optional - Message language, `en` or `es` (default: "en")
    pub fn from_env() -> Result<Self> {
        // Parse account name (required)
        let username = env::var("ASM_USERNAME")
            .context("ASM_USERNAME not set")?;

        if username.trim().is_empty() {
            bail!("ASM_USERNAME cannot be empty");
        }

        // Parse gateway URL (required)
        let gateway_url = env::var("ASM_GATEWAY_URL")
            .context("ASM_GATEWAY_URL not set")?;

        if gateway_url.trim().is_empty() {
            bail!("ASM_GATEWAY_URL cannot be empty");
        }

        let timeout = match env::var("ASM_TIMEOUT") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("ASM_TIMEOUT is not a number of seconds: {}", value))?,
            Err(_) => 30,
        };

        let debug = bool_var("ASM_DEBUG")?;
        let weight = bool_var("ASM_WEIGHT")?;
        let reference_origin = bool_var("ASM_REFERENCE_ORIGIN")?;

        let default_service = env::var("ASM_DEFAULT_SERVICE")
            .ok()
            .filter(|code| !code.trim().is_empty())
            .map(|code| CarrierService::from_code(code.trim()));

        let weight_unit = unit_var("ASM_WEIGHT_UNIT")?;
        let weight_api_unit = unit_var("ASM_WEIGHT_API_UNIT")?;

        let database_name = env::var("DATABASE_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "erp".to_string());

        let label_dir = env::var("ASM_LABEL_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let lang = match env::var("ASM_LANG") {
            Ok(value) => value
                .parse::<Lang>()
                .map_err(|e| anyhow::anyhow!("ASM_LANG: {}", e))?,
            Err(_) => Lang::En,
        };

        Ok(Config {
            api: CarrierApi {
                username,
                timeout,
                debug,
                default_service,
                weight,
                weight_unit,
                weight_api_unit,
                reference_origin,
            },
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            database_name,
            label_dir,
            lang,
        })
    }
}

fn bool_var(name: &str) -> Result<bool> {
    match env::var(name) {
        Ok(value) => parse_bool(&value).with_context(|| format!("{} is not a boolean", name)),
        Err(_) => Ok(false),
    }
}

fn unit_var(name: &str) -> Result<Option<WeightUnit>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .parse::<WeightUnit>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{}: {}", name, e)),
        _ => Ok(None),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unexpected value {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn parses_common_boolean_spellings() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool(" 1 ").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(!parse_bool("").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
