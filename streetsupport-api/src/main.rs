use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use streetsupport_api::{config, factory, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(".env.local").ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("streetsupport_api=debug,tower_http=info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::read_config().context("Failed to read configuration")?;
    let app_state = factory::build_app_state(&settings)
        .await
        .context("Failed to build application state")?;
    let app = router::create(app_state, &settings.application.app_url);

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        "Listening on {} ({} environment)",
        addr,
        settings.environment
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
