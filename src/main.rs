mod model;
mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    router,
    service::{jwt::JwtKeys, storage::PhotoStorage},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_clients = startup::setup_oauth_clients(&config)?;
    startup::ensure_upload_dir(&config).await?;

    let state = AppState {
        db,
        http_client,
        oauth_clients,
        jwt_keys: JwtKeys::new(&config.jwt_secret),
        api_key: config.api_key.clone(),
        admin_user_id: config.admin_user_id,
        storage: PhotoStorage::new(&config.upload_dir, config.app_url.clone()),
    };

    let app = router::router(state).layer(session);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!("Listening on {}", config.app_url);

    axum::serve(listener, app).await?;

    Ok(())
}
