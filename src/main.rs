use anyhow::Context;
use fm_monitor::ingest::zmq::ZmqFrameSource;
use fm_monitor::{
    create_router, AppState, Config, MonitorStore, ScopeKind, SelectionCoordinator,
    StationCatalog, Subscriber, SubscriberConfig, Topic, XmlRpcControlPlane,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fm_monitor=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting FM monitor");

    let config = Config::from_env();

    // Station catalog: built-in demo list unless a stations file is given
    let catalog = match &config.stations_file {
        Some(path) => {
            let catalog = StationCatalog::from_file(path)?;
            info!("Loaded {} stations from {}", catalog.len(), path.display());
            catalog
        }
        None => StationCatalog::builtin(),
    };
    let catalog = Arc::new(catalog);

    let store = Arc::new(MonitorStore::new());
    let control = Arc::new(
        XmlRpcControlPlane::new(&config.control_url, config.control_timeout)
            .context("building control-plane client")?,
    );
    info!("Control plane at {}", config.control_url);

    let selection = Arc::new(SelectionCoordinator::new(
        catalog.clone(),
        control,
        store.clone(),
    ));

    // One subscriber per telemetry topic
    let topics = [
        (Topic::Text, &config.rds_endpoint, config.text_hwm),
        (
            Topic::Scope(ScopeKind::Audio),
            &config.audio_endpoint,
            config.scope_hwm,
        ),
        (
            Topic::Scope(ScopeKind::Rds),
            &config.rds_scope_endpoint,
            config.scope_hwm,
        ),
        (
            Topic::Constellation,
            &config.constellation_endpoint,
            config.constellation_hwm,
        ),
    ];
    let mut subscribers = Vec::with_capacity(topics.len());
    for (topic, endpoint, hwm) in topics {
        info!("📡 {}: subscribing to {} (hwm {})", topic.label(), endpoint, hwm);
        subscribers.push(Subscriber::spawn(
            SubscriberConfig {
                topic,
                endpoint: endpoint.clone(),
                hwm,
                retry_delay: config.retry_delay,
            },
            ZmqFrameSource::new(endpoint.clone()),
            store.clone(),
        ));
    }

    // Build router
    let app = create_router(AppState {
        store,
        catalog,
        selection,
    });

    let addr: SocketAddr = config.bind_addr.parse().context("invalid BIND_ADDR")?;
    info!("🎧 Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
