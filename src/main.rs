use anyhow::Context;
use clap::Parser;

use dhlab_dispersion::app::{build_router, AppState};
use dhlab_dispersion::settings::Settings;

/// Proxy between the dispersion UI and the National Library's DHLAB API.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (extension optional).
    #[arg(long, default_value = "config/default")]
    config: String,

    /// Override the bind address from the configuration.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dhlab_dispersion=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting dhlab-dispersion server...");

    let mut settings = Settings::load(Some(cli.config.as_str())).context("loading configuration")?;
    if let Some(bind) = cli.bind {
        settings.server.bind_addr = bind;
    }

    let state = AppState::from_upstream(&settings.upstream)
        .context("building upstream HTTP client")?;

    tracing::info!(
        dhlab = %settings.upstream.dhlab_base_url,
        catalog = %settings.upstream.catalog_base_url,
        timeout_secs = settings.upstream.timeout_secs,
        "Upstream client initialized"
    );

    let app = build_router(state, settings.server.static_dir.as_deref());

    // Start the server
    let listener = tokio::net::TcpListener::bind(&settings.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", settings.server.bind_addr))?;
    tracing::info!("Listening on http://{}", settings.server.bind_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
