//! Book Catalog
//!
//! A small server-rendered library catalog: list, paginate, search, create,
//! update and delete book records stored in PostgreSQL (or in memory).

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire services around the given store
    pub fn new(config: AppConfig, store: repository::SharedStore) -> Self {
        let services = services::Services::new(store, &config.catalog);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
