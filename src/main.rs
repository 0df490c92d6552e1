use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use asm_shipments::{
    AsmShipments,
    CarrierError,
    config::Config,
    gateway::GatewayConnector,
    logging,
    messages::Catalog,
    store::MemoryStore,
};
use tracing::info;

const USAGE: &str = "usage: asm-shipments <send|print|test> <shipments.json>";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    let mut args = std::env::args().skip(1);
    let command = args.next().context(USAGE)?;

    let connector = Arc::new(GatewayConnector::new(config.gateway_url.clone()));

    if command == "test" {
        let shipments = AsmShipments::new(
            config.api.clone(),
            connector,
            Arc::new(MemoryStore::default()),
            config.database_name.clone(),
        )
        .with_catalog(Catalog::new(config.lang));

        return match shipments.test_connection().await {
            Err(CarrierError::User(message)) => {
                println!("{}", message);
                Ok(())
            }
            Err(e) => Err(e.into()),
            Ok(()) => Ok(()),
        };
    }

    let path = PathBuf::from(args.next().context(USAGE)?);
    let store = Arc::new(
        MemoryStore::load(&path)
            .await
            .with_context(|| format!("Failed to load shipments from {}", path.display()))?,
    );

    let mut asm = AsmShipments::new(
        config.api.clone(),
        connector,
        store.clone(),
        config.database_name.clone(),
    )
    .with_catalog(Catalog::new(config.lang));
    if let Some(dir) = &config.label_dir {
        asm = asm.with_label_dir(dir.clone());
    }

    let shipments = store.all().await;
    info!("Loaded {} shipments from {}", shipments.len(), path.display());

    match command.as_str() {
        "send" => {
            let pending: Vec<_> = shipments
                .into_iter()
                .filter(|s| s.carrier_tracking_ref.is_none())
                .collect();
            let result = asm.send(&pending).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        "print" => {
            let labels = asm.print_labels(&shipments).await?;
            println!("{}", serde_json::to_string_pretty(&labels)?);
        }
        other => bail!("unknown command {:?}\n{}", other, USAGE),
    }

    store
        .save(&path)
        .await
        .with_context(|| format!("Failed to save shipments to {}", path.display()))?;

    Ok(())
}
