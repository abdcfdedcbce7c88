//! Backend entry-point: loads settings, selects storage, and serves the
//! course catalogue API.

mod server;

use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::cookie_config::{BuildMode, auth_settings_from_env};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_process().map_err(std::io::Error::other)?;
    let auth = auth_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let config = ServerConfig::from_settings(&settings, auth).map_err(std::io::Error::other)?;
    let bind_addr = config.bind_addr;

    let (server, _health_state) = create_server(config).await?;
    info!(%bind_addr, "catalogue server listening");
    server.await
}
