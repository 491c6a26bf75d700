mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{http::StatusCode, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use dto::common_dto::ApiResponse;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env();

    // Configurar logging
    let log_level = if config.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚗 Vehicle Rental System - API");
    info!("==============================");

    // Inicializar base de datos
    let pool = match database::create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = database::init_schema(&pool).await {
        error!("❌ Error inicializando el schema: {}", e);
        return Err(anyhow::anyhow!("Error de schema: {}", e));
    }
    info!("✅ Base de datos conectada y schema inicializado");

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app = Router::new()
        .route("/", get(root_endpoint))
        .nest("/api/v1/auth", routes::auth_routes::create_auth_router())
        .nest(
            "/api/v1/users",
            routes::user_routes::create_user_router(app_state.clone()),
        )
        .nest(
            "/api/v1/vehicles",
            routes::vehicle_routes::create_vehicle_router(app_state.clone()),
        )
        .nest(
            "/api/v1/bookings",
            routes::booking_routes::create_booking_router(app_state.clone()),
        )
        .fallback(fallback_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("🔑 Auth:");
    info!("   POST /api/v1/auth/signup - Registrar usuario");
    info!("   POST /api/v1/auth/signin - Iniciar sesión");
    info!("👤 Users:");
    info!("   GET    /api/v1/users - Listar usuarios (admin)");
    info!("   PUT    /api/v1/users/:id - Actualizar usuario");
    info!("   DELETE /api/v1/users/:id - Eliminar usuario (admin)");
    info!("🚗 Vehicles:");
    info!("   POST   /api/v1/vehicles - Crear vehículo (admin)");
    info!("   GET    /api/v1/vehicles - Listar vehículos");
    info!("   GET    /api/v1/vehicles/:id - Obtener vehículo");
    info!("   PUT    /api/v1/vehicles/:id - Actualizar vehículo (admin)");
    info!("   DELETE /api/v1/vehicles/:id - Eliminar vehículo (admin)");
    info!("📅 Bookings:");
    info!("   POST /api/v1/bookings - Crear reserva");
    info!("   GET  /api/v1/bookings - Listar reservas");
    info!("   PUT  /api/v1/bookings/:id - Transicionar estado de reserva");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint raíz de health check
async fn root_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Vehicle Rental System API is running"
    }))
}

/// Fallback para rutas no registradas - mismo envelope que el resto de la API
async fn fallback_handler() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Endpoint not found".to_string())),
    )
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
