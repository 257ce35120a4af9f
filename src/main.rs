use std::sync::Arc;

use telesecundaria::adapters::auth::JwtSessionService;
use telesecundaria::adapters::http::{build_router, AppState, HttpSettings};
use telesecundaria::adapters::postgres::{
    PostgresAccountRepository, PostgresAttendanceRepository, PostgresCycleRepository,
    PostgresGroupRepository, PostgresPlanningReader, PostgresPlanningRepository,
    PostgresStudentRepository, MIGRATOR,
};
use telesecundaria::adapters::storage::LocalUploadStorage;
use telesecundaria::application::CycleResolver;
use telesecundaria::config::AppConfig;
use telesecundaria::domain::academic_cycle::CycleName;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("telesecundaria failed: {e}");
        eprintln!("telesecundaria failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    if config.database.run_migrations {
        MIGRATOR.run(&pool).await?;
        info!("database migrations applied");
    }

    let cycles = Arc::new(PostgresCycleRepository::new(pool.clone()));
    let sessions = Arc::new(JwtSessionService::new(
        &config.auth.session_secret,
        config.auth.session_ttl(),
    ));
    let resolver = Arc::new(CycleResolver::new(
        cycles.clone(),
        CycleName::new(&config.school.fallback_cycle)?,
    ));

    std::fs::create_dir_all(&config.storage.upload_dir)?;
    let state = AppState {
        cycles,
        accounts: Arc::new(PostgresAccountRepository::new(pool.clone())),
        plannings: Arc::new(PostgresPlanningRepository::new(pool.clone())),
        planning_reader: Arc::new(PostgresPlanningReader::new(pool.clone())),
        attendance: Arc::new(PostgresAttendanceRepository::new(pool.clone())),
        groups: Arc::new(PostgresGroupRepository::new(pool.clone())),
        students: Arc::new(PostgresStudentRepository::new(pool)),
        storage: Arc::new(LocalUploadStorage::new(
            &config.storage.upload_dir,
            config.storage.max_upload_bytes,
        )),
        session_validator: sessions.clone(),
        session_issuer: sessions,
        resolver,
        settings: HttpSettings::from_config(&config),
    };
    let app = build_router(state, &config.storage.upload_dir);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        environment = ?config.server.environment,
        "telesecundaria listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;
    info!("telesecundaria stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}
