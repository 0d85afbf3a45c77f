//! Session gate - Entry Point
//!
//! Serves the login/logout line protocol over TCP.

use log::{error, info};
use std::sync::Arc;

use session_gate::auth::UserDirectory;
use session_gate::config::GateConfig;
use session_gate::notify::{ChannelNotifier, drain_alerts};
use session_gate::session::GateOptions;
use session_gate::utils::setup_logging;
use session_gate::{LoginService, Server};

const ALERT_QUEUE_CAPACITY: usize = 256;

#[tokio::main]
async fn main() {
    setup_logging();

    let config = match GateConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let users = UserDirectory::new(config.users.clone());
    if users.is_empty() {
        info!("No users configured; every login attempt will be rejected");
    }

    let (notifier, alerts) = ChannelNotifier::channel(ALERT_QUEUE_CAPACITY);
    drain_alerts(alerts);

    let service = Arc::new(LoginService::new(
        users,
        config.session.settings_source(),
        notifier,
        GateOptions::from(&config.session),
    ));

    info!("Launching session gate...");

    let server = match Server::bind(&config, service).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            std::process::exit(1);
        }
    };
    server.start().await;
}
