use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info, warn, Level};

use worktop_quoting::config::EnvironmentConfig;
use worktop_quoting::database::{connect, run_migrations};
use worktop_quoting::middleware::cors::cors_layer;
use worktop_quoting::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Configurar logging
    let level: Level = config.log_level.parse().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🪨 Worktop Quoting API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    if config.uses_development_jwt_secret() {
        warn!("⚠️ JWT_SECRET no configurado, usando clave de desarrollo");
    }

    // Inicializar base de datos
    let pool = match connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if config.run_migrations {
        run_migrations(&pool).await.context("Error aplicando migraciones")?;
    }

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let cors = cors_layer(&config.cors_origins);
    if config.cors_origins.is_empty() && !config.is_development() {
        warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: se aceptan todos los orígenes");
    }

    let state = AppState::new(pool, &config).context("Error inicializando el estado")?;

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors),
    );

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET   /health - Health check");
    info!("🔑 Autenticación:");
    info!("   POST  /api/register - Registrar empresa y administrador");
    info!("   POST  /api/login - Login");
    info!("   GET   /api/me - Usuario y empresa actuales");
    info!("🏢 Empresa:");
    info!("   GET   /api/branding - Branding y datos de contacto");
    info!("   PUT   /api/branding - Actualizar branding");
    info!("   PUT   /api/company - Actualizar perfil de empresa");
    info!("📝 Presupuestos:");
    info!("   POST  /api/quotes - Crear presupuesto");
    info!("   GET   /api/quotes - Listar presupuestos");
    info!("   GET   /api/quotes/:id - Obtener presupuesto");
    info!("   PATCH /api/quotes/:id/status - Cambiar estado");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("No se pudo escuchar en {}", addr))?;

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
