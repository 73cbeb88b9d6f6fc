use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::connection::serve_connection;
use super::errors::{ConnectionError, ListenerError};
use super::shutdown::{Shutdown, shutdown_channel};
use crate::metrics::ConnectionGauge;
use crate::router::Router;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections and serves each one on its own task.
pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    pub async fn bind(addr: &str, router: Router) -> Result<Self, ListenerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ListenerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self { listener, router })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ListenerError> {
        self.listener.local_addr().map_err(ListenerError::LocalAddr)
    }

    /// Serves until `signal` resolves, then stops accepting, tells every
    /// connection to finish, and waits for all of them.
    pub async fn run_until<F>(self, signal: F) -> Result<(), ListenerError>
    where
        F: Future<Output = ()>,
    {
        let Server { listener, router } = self;
        let (trigger, shutdown) = shutdown_channel();
        let mut connections = JoinSet::new();
        tokio::pin!(signal);

        loop {
            tokio::select! {
                () = &mut signal => {
                    info!(active = connections.len(), "Shutdown requested, no longer accepting");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        if let Err(e) = stream.set_nodelay(true) {
                            debug!(error = %e, "Failed to set TCP_NODELAY");
                        }
                        let connection_id = Uuid::new_v4();
                        let span = info_span!("connection", %connection_id, %peer);
                        connections.spawn(
                            handle(stream, router.clone(), shutdown.clone()).instrument(span),
                        );
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    log_join(joined);
                }
            }
        }

        drop(listener);
        trigger.send_replace(true);

        while let Some(joined) = connections.join_next().await {
            log_join(joined);
        }
        info!("All connections closed");
        Ok(())
    }
}

async fn handle(stream: tokio::net::TcpStream, router: Router, shutdown: Shutdown) {
    let _gauge = ConnectionGauge::open();
    debug!("Connection opened");

    match serve_connection(stream, router, shutdown).await {
        Ok(()) => debug!("Connection closed"),
        Err(ConnectionError::FrameTooLarge { limit }) => {
            warn!(limit, "Frame too large, closing connection")
        }
        Err(e) => warn!(error = %e, "Connection closed with error"),
    }
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined
        && e.is_panic()
    {
        error!(error = %e, "Connection task panicked");
    }
}
