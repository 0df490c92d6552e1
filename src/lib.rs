pub mod carrier;
pub mod config;
pub mod error;
pub mod gateway;
pub mod labels;
pub mod logging;
pub mod messages;
pub mod models;
pub mod payload;
pub mod picking;
pub mod sender;
pub mod services;
pub mod store;
pub mod text;
pub mod uom;

pub use error::{CarrierError, Result};
pub use sender::AsmShipments;
