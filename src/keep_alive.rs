use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::{Error, Result};

pub const LIVENESS_RESPONSE: &str = "Automata Bot is running!";

async fn home() -> &'static str {
    LIVENESS_RESPONSE
}

pub fn router() -> Router {
    Router::new().route("/", get(home))
}

// Binds the liveness endpoint and serves it in the background. A failed bind
// is an error; failures while serving are only logged, the bot keeps running.
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| Error::Configuration(err.to_string()))?;
    info!("Liveness endpoint started on {}", addr);

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router()).await {
            error!("Liveness endpoint failed: {}", err.to_string());
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::keep_alive::{home, LIVENESS_RESPONSE};

    #[tokio::test]
    async fn test_home_reports_the_process_alive() {
        assert_eq!(home().await, "Automata Bot is running!");
        assert_eq!(LIVENESS_RESPONSE, "Automata Bot is running!");
    }
}
