use portal_gate::{
    AppState,
    config::{AppConfig, Env},
    create_router,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: configuration, logging, then the HTTP server with the route guard in
/// front of the front-end bundle.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load().expect("FATAL: invalid gate configuration");

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise verbose defaults for the gate itself.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "portal_gate=debug,tower_http=info,axum=trace".into());

    // 3. Log format per environment: pretty locally, JSON for aggregators in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Gate starting in {:?} mode", config.env);

    if !config.assets_present() {
        tracing::warn!(
            assets_dir = %config.assets_dir.display(),
            "front-end bundle not found; page requests will return 404 until it is built"
        );
    }

    // 4. Unified State Assembly
    let app_state = AppState::new(config);
    tracing::info!(
        matchers = ?app_state.paths.matcher_patterns(),
        "Route guard active; requests without a token cookie are sent to {}",
        portal_gate::guard::SIGN_IN_PATH
    );

    // 5. Router and Server Startup
    let bind_address = app_state.config.bind_address();
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .expect("FATAL: failed to bind listener. Check HOST and PORT.");

    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, app)
        .await
        .expect("FATAL: server terminated unexpectedly");
}
