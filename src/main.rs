use axum::extract::DefaultBodyLimit;
use internship_portal::{
    config::{get_config, init_config},
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("internship_portal=info,tower_http=info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let app_state = AppState::new(config)?;

    // multipart framing needs a little room above the file itself
    let body_limit = config.max_upload_bytes + 64 * 1024;

    let app = routes::portal_router()
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = TcpListener::bind(&config.server_address).await?;
    info!(
        "Server listening on {} (backend {})",
        listener.local_addr()?,
        config.api_base_url
    );
    axum::serve(listener, app).await?;
    Ok(())
}
