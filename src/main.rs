use std::sync::Arc;

use fitness_booking_service::{
    client::db::{DatabaseClient, DatabaseClientExt},
    config::{tracing::subscribe_tracing, ServiceConfig},
    create_router, migration, ServiceState,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    subscribe_tracing();

    let service_config = ServiceConfig::from_env()?;

    let db_client = DatabaseClient::build_from_config(&service_config)
        .await
        .map_err(|e| {
            error!("💥 Error in database connection: {}", e);
            "Failed to build database client"
        })?;

    migration::sync_schema(&db_client).await.map_err(|e| {
        error!("💥 Failed to create database schema: {}", e);
        "Failed to create database schema"
    })?;

    let listener_addr = service_config.server.get_socket_addr().map_err(|e| {
        error!("💥 Failed to get socket address: {}", e);
        "Invalid socket address"
    })?;

    let service_state = Arc::new(ServiceState {
        config: Arc::new(service_config),
        db: Arc::new(db_client),
    });

    let tcp_listener = tokio::net::TcpListener::bind(listener_addr)
        .await
        .map_err(|e| {
            error!("💥 Failed to bind TCP listener: {}", e);
            "Failed to bind TCP listener"
        })?;

    let addr = tcp_listener.local_addr().map_err(|e| {
        error!("💥 Failed to get addr of the listener: {}", e);
        "Failed to get local listener address"
    })?;

    info!("🚀 The server is listening on: {}", addr);

    let router = create_router(service_state);
    axum::serve(tcp_listener, router).await.map_err(|e| {
        error!("💥 Server error: {}", e);
        "Server error occurred"
    })?;

    Ok(())
}
