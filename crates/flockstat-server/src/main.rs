mod api;
mod middleware;

use std::sync::Arc;

use flockstat_youtube::{YoutubeClient, YoutubeConfig};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState, DATA_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = flockstat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(?config, "loaded configuration");

    let youtube = YoutubeClient::new(YoutubeConfig::from_app_config(&config))?;
    let app = build_app(AppState {
        youtube: Arc::new(youtube),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        endpoint = DATA_PATH,
        env = %config.env,
        "server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
