use std::time::Duration;

use crate::{config::Settings, error, info, server, warning};

/// Runs the HTTP server until it stops.
///
/// Loads the [`Settings`] from the environment, applies the command-line
/// overrides and serves the API. Startup failures terminate the program with
/// an error message.
///
/// # Arguments
///
/// * `addr` - Bind address overriding `SERVER_ADDRESS`
/// * `open` - Open the login page in the default browser once the server is up
pub async fn serve(addr: Option<String>, open: bool) {
    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load settings. Err: {}", e),
    };

    if let Some(addr) = addr {
        settings.server_addr = addr;
    }

    if open {
        let url = login_url(&settings);
        tokio::spawn(async move {
            // give the listener a moment to bind
            tokio::time::sleep(Duration::from_millis(500)).await;
            info!("Opening {}", url);
            if webbrowser::open(&url).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    url
                );
            }
        });
    }

    if let Err(e) = server::start_api_server(settings).await {
        error!("Server stopped. Err: {}", e);
    }
}

/// URL of the login route as reachable from a local browser.
pub fn login_url(settings: &Settings) -> String {
    let scheme = if settings.tls.is_some() { "https" } else { "http" };
    let port = settings
        .server_addr
        .rsplit_once(':')
        .map(|(_, port)| port)
        .unwrap_or("5000");

    format!("{scheme}://localhost:{port}/login")
}
