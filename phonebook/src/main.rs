use std::{process, sync::Arc};

use phonebook::{handler, repositories::sql::SqlPersonRepository, server::Server, AppState};
use tracing_subscriber::EnvFilter;

const SERVER_ADDRESS: &str = "0.0.0.0:3001";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let server_address =
        std::env::var("SERVER_ADDRESS").unwrap_or_else(|_| SERVER_ADDRESS.to_string());

    let repository = match SqlPersonRepository::connect().await {
        Ok(repository) => repository,
        Err(err) => {
            tracing::error!(%err, "failed to reach the person store");
            process::exit(1);
        }
    };

    let state = AppState {
        repository: Arc::new(repository.clone()),
    };
    let server = Server::new(state, handler::route_request);

    tokio::select! {
        res = server.bind(server_address) => {
            if let Err(err) = res {
                tracing::error!(%err, "server failed");
                repository.close().await;
                process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
        }
    }

    repository.close().await;
}
