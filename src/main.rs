use std::sync::Arc;

use paramvault::{
    api::start_api_server,
    config::AppConfig,
    kms, observability,
    pipeline::SecretPipeline,
    storage::create_pool,
    store, Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    // This must happen before any config is read from environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let config = AppConfig::from_env()?;
    observability::init_tracing(&config.observability)?;

    info!(app_name = APP_NAME, version = VERSION, "Starting ParamVault");
    observability::log_config_info(&config);

    let pool = create_pool(&config.database).await?;

    let kms_client = kms::from_config(&config.kms, config.vault.as_ref()).await?;
    let parameter_store = store::from_config(&config.store, config.vault.as_ref()).await?;

    let pipeline = Arc::new(SecretPipeline::new(
        pool,
        kms_client,
        parameter_store,
        config.kms.key_id.clone(),
    ));

    start_api_server(config.api, pipeline).await
}
