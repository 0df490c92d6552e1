use futures::FutureExt;
use std::panic::{AssertUnwindSafe, resume_unwind};

use crate::error::{CarrierError, Result};
use crate::messages::MessageId;
use crate::sender::{AsmShipments, close_session};

pub const ASM_APP: (&str, &str) = ("asm", "ASM");

/// Carrier applications available to the API configuration, ASM included.
pub fn carrier_apps(mut apps: Vec<(String, String)>) -> Vec<(String, String)> {
    if !apps.iter().any(|(code, _)| code == ASM_APP.0) {
        apps.push((ASM_APP.0.to_string(), ASM_APP.1.to_string()));
    }
    apps
}

impl AsmShipments {
    /// Check the ASM account.
    ///
    /// The diagnostic always comes back as a user error, whatever the outcome.
    pub async fn test_connection(&self) -> Result<()> {
        let session = self.connector().open(self.api()).await?;

        let outcome = AssertUnwindSafe(session.test_connection()).catch_unwind().await;
        close_session(session.as_ref()).await;

        let message = match outcome {
            Ok(Ok(message)) if !message.is_empty() => message,
            Ok(Ok(_)) => self.catalog().gettext(MessageId::ConnectionUnknown, &[]),
            Ok(Err(e)) => e.to_string(),
            Err(panic) => resume_unwind(panic),
        };

        Err(CarrierError::User(message))
    }
}
