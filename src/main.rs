use anyhow::Context;
use staydesk::{app, auth::Clients, config::Config, db, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::from_env()?;
    let db_pool = db::connect(&config).await?;

    let clients = match &config.oauth_clients_file {
        Some(path) => Clients::from_file(path, &config.public_url)?,
        None => {
            tracing::warn!("OAUTH_CLIENTS_FILE not set; sign-in is disabled");
            Clients::default()
        }
    };

    let app_state = AppState { db_pool, clients };
    let app = app::build(app_state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("server stopped unexpectedly")
        .inspect_err(|e| tracing::error!(error.cause_chain = ?e, error.message = %e, "server error"))
}
