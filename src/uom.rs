use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weight units a shipment or the carrier may express weights in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "oz")]
    Ounce,
}

impl WeightUnit {
    /// Kilograms in one unit.
    fn factor(self) -> f64 {
        match self {
            WeightUnit::Gram => 0.001,
            WeightUnit::Kilogram => 1.0,
            WeightUnit::Pound => 0.453_592_37,
            WeightUnit::Ounce => 0.028_349_523_125,
        }
    }

    /// Decimal places kept after conversion.
    fn digits(self) -> i32 {
        match self {
            WeightUnit::Gram => 0,
            _ => 2,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Gram => "g",
            WeightUnit::Kilogram => "kg",
            WeightUnit::Pound => "lb",
            WeightUnit::Ounce => "oz",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(WeightUnit::Gram),
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kilogram),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Pound),
            "oz" | "ounce" | "ounces" => Ok(WeightUnit::Ounce),
            other => Err(format!("unknown weight unit {:?}", other)),
        }
    }
}

/// Convert `qty` expressed in `from` into `to`, rounded to the precision of `to`.
pub fn compute_qty(from: WeightUnit, qty: f64, to: WeightUnit) -> f64 {
    if from == to {
        return qty;
    }
    let converted = qty * from.factor() / to.factor();
    let scale = 10f64.powi(to.digits());
    (converted * scale).round() / scale
}
