use dashprints_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, store, transport, routes)
    let (_state, router) = dashprints_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    dashprints_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
