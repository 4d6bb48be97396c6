use smile_cli::render::render_list;
use smile_cli::{config_from_env, init_tracing};
use smile_client::HttpResources;
use smile_core::{ClientError, Dashboard, TokenStore};
use std::sync::Arc;

/// Main entry point for the Bright Smile dashboard
///
/// Loads every resource list of the clinic concurrently and prints them in dashboard order:
/// clinics, doctors, affiliations, patients, appointments. A section whose load failed shows
/// only its error message; the other sections are unaffected.
///
/// # Environment Variables
/// - `SMILE_API_BASE`: clinic API base URL (default: "http://127.0.0.1:8000")
/// - `SMILE_TOKEN_FILE`: where the access token is stored (default: ".smile/access_token")
/// - `SMILE_HTTP_TIMEOUT_SECS`: per-request timeout in seconds (default: 30)
///
/// # Returns
/// * `Ok(())` - If the dashboard was rendered, or no token is stored and login is required
/// * `Err(anyhow::Error)` - If configuration or the token file is invalid
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cfg = config_from_env()?;
    let store = TokenStore::new(cfg.token_file());

    let session = match store.session() {
        Ok(session) => session,
        Err(ClientError::MissingToken) => {
            println!("Not logged in. Store a token with `smile token set <TOKEN>`.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if let Err(e) = session.authorize() {
        println!("{}. Store a fresh token with `smile token set <TOKEN>`.", e);
        return Ok(());
    }

    tracing::info!("loading dashboard from {}", cfg.api_base());
    let remote = Arc::new(HttpResources::new(&cfg)?);
    let mut dashboard = Dashboard::new(remote, Arc::new(session));
    dashboard.activate().await;

    for section in dashboard.sections() {
        println!("{}", render_list(section));
    }

    Ok(())
}
