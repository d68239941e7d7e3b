use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use fleet_admin::config::EnvironmentConfig;
use fleet_admin::database::connect_document_store;
use fleet_admin::state::{build_object_storage, AppState};
use fleet_admin::create_app;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚚 Fleet Admin - Panel de administración logística");
    info!("================================================");

    // Inicializar almacén de documentos
    let store = match connect_document_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error conectando al almacén de documentos: {}", e);
            return Err(e);
        }
    };

    let storage = build_object_storage(&config)?;
    if !config.kyc_gate {
        warn!("⚠️ KYC_GATE desactivado: las secciones operativas no exigen KYC");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(store, storage, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/signup - Registrar cuenta");
    info!("   POST /api/auth/signin - Iniciar sesión");
    info!("   GET  /api/auth/me - Cuenta actual");
    info!("🪪 KYC:");
    info!("   POST /api/kyc/submit - Enviar documentos (multipart o JSON)");
    info!("   GET  /api/kyc/status - Estado KYC");
    info!("📊 GET  /api/dashboard - Resumen del panel");
    info!("📦 Pedidos:");
    info!("   GET/POST /api/orders - Listar / guardar pedido");
    info!("   GET  /api/orders/status-counts - Conteo por estado");
    info!("   GET/DELETE /api/orders/:id");
    info!("🧑‍✈️ Conductores:");
    info!("   GET/POST /api/drivers - Listar / guardar conductor");
    info!("   GET/DELETE /api/drivers/:mobile");
    info!("   POST /api/drivers/:mobile/documents/:slot - Subir documento");
    info!("🚗 Vehículos:");
    info!("   GET/POST /api/vehicles - Listar / guardar vehículo");
    info!("   GET  /api/vehicles/grouped - Agrupados por tipo");
    info!("   GET/DELETE /api/vehicles/:id");
    info!("💰 Liquidaciones:");
    info!("   GET  /api/settlements - Listar con filtros");
    info!("   POST /api/settlements/:id/paid - Marcar como pagado");
    info!("📍 GET  /api/tracking - Seguimiento de pedidos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
