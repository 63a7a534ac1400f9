pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod startup;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
pub use storage::{StoredUpload, UploadStore};

pub struct AppState {
    pub config: Config,
    pub store: UploadStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = UploadStore::from_config(&config);
        Self { config, store }
    }
}
