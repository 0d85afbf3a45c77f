use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::auth::UserDirectory;
use crate::config::GateConfig;
use crate::notify::ChannelNotifier;
use crate::server::connection::handle_connection;
use crate::service::LoginService;
use crate::session::SettingsSource;

/// Login service as wired by the binary
pub type GateService = LoginService<UserDirectory, SettingsSource, ChannelNotifier>;

pub struct Server {
    listener: TcpListener,
    service: Arc<GateService>,
    session_max_age: Duration,
    max_line_length: usize,
}

impl Server {
    /// Binds the configured listen socket.
    pub async fn bind(config: &GateConfig, service: Arc<GateService>) -> std::io::Result<Self> {
        let socket = config.server.listen_socket();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e);
            }
        };
        Ok(Self::from_listener(listener, config, service))
    }

    /// Wraps an already bound listener.
    pub fn from_listener(
        listener: TcpListener,
        config: &GateConfig,
        service: Arc<GateService>,
    ) -> Self {
        Self {
            listener,
            service,
            session_max_age: config.session.default_session_max_age(),
            max_line_length: config.server.max_line_length,
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(&self) {
        match self.local_addr() {
            Ok(addr) => info!("Starting session gate on {}", addr),
            Err(e) => warn!("Starting session gate on unknown address: {}", e),
        }

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let service = Arc::clone(&self.service);
                    let session_max_age = self.session_max_age;
                    let max_line_length = self.max_line_length;

                    // One task per connection so the accept loop never blocks
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(
                            stream,
                            addr,
                            service,
                            session_max_age,
                            max_line_length,
                        )
                        .await
                        {
                            warn!("Failed to handle client {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
