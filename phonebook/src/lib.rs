pub mod domains;
pub mod error;
pub mod handler;
pub mod http;
pub mod repositories;
pub mod server;

use std::{sync::Arc, time::Duration};

use repositories::PersonRepository;

/// Budget for reading, handling and answering a single connection.
pub const TIMEOUT_DURATION: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn PersonRepository + Send + Sync>,
}
