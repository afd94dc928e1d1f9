pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod entity;
pub mod error;
pub mod migration;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::{client::db::DatabaseClient, config::ServiceConfig};

pub use routes::create_router;

#[derive(Clone)]
pub struct ServiceState {
    pub config: Arc<ServiceConfig>,
    pub db: Arc<DatabaseClient>,
}
