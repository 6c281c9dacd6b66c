//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;

use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::RequestHandler;
use crate::server::stats::{Outcome, ServerStats};

/// An HTTP/1.0 file server.
pub struct HttpServer {
    /// The server configuration.
    pub config: Arc<ServerConfig>,
    handler: Arc<RequestHandler>,
    stats: Arc<ServerStats>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the configuration is invalid or the document root cannot be
    /// canonicalised.
    pub fn new(config: ServerConfig) -> Result<Self, Error> {
        config.validate()?;
        let handler = RequestHandler::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            handler: Arc::new(handler),
            stats: Arc::new(ServerStats::default()),
        })
    }

    /// Outcome counters for this server.
    pub fn stats(&self) -> Arc<ServerStats> {
        self.stats.clone()
    }

    /// Set up the TCP listener and report the port it got.
    pub async fn bind(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        let local_addr = listener.local_addr()?;
        info!(
            "Serving {root} on http://{local_addr}",
            root = self.handler.resolver().root().display()
        );
        info!("Port number is: {port}", port = local_addr.port());
        Ok(listener)
    }

    /// Bind, then serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.bind().await?;
        self.start_with(listener).await
    }

    /// Serve on an already bound listener until Ctrl+C.
    pub async fn start_with(&self, listener: TcpListener) -> Result<(), Error> {
        self.serve(listener, Self::ctrl_c()).await
    }

    async fn ctrl_c() {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
            Err(e) => {
                error!("Error setting up Ctrl+C handler: {e}");
                // Without a signal handler, run until the process is killed.
                std::future::pending::<()>().await;
            }
        }
    }

    /// Accept connections on `listener` until `shutdown` completes.
    ///
    /// A permit is taken before each accept, so at most `max_connections`
    /// requests are in flight and further clients wait in the backlog.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            // Reap finished connection tasks
            while let Some(res) = tasks.try_join_next() {
                if let Err(e) = res {
                    error!("Connection task failed: {e}");
                }
            }

            let permit = tokio::select! {
                _ = &mut shutdown => break,
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            tokio::select! {
                _ = &mut shutdown => break,
                accept_result = listener.accept() => match accept_result {
                    Ok((socket, addr)) => self.spawn_connection(socket, addr, permit, &mut tasks),
                    Err(e) => Self::handle_accept_error(e).await,
                },
            }
        }

        info!("Shutting down server...");
        Self::perform_shutdown(&mut tasks).await;

        let stats = self.stats.snapshot();
        info!(
            "Served {ok} ok, {client} client errors, {server} server errors; \
             {closed} closed early, {timed_out} timed out, {aborted} aborted",
            ok = stats.ok,
            client = stats.client_errors,
            server = stats.server_errors,
            closed = stats.client_closed,
            timed_out = stats.timed_out,
            aborted = stats.aborted,
        );

        Ok(())
    }

    /// Spawn the task serving one accepted connection.
    fn spawn_connection(
        &self,
        mut socket: TcpStream,
        addr: SocketAddr,
        permit: OwnedSemaphorePermit,
        tasks: &mut JoinSet<()>,
    ) {
        let handler = self.handler.clone();
        let stats = self.stats.clone();

        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            match handler.handle_connection(&mut socket).await {
                Ok(outcome) => {
                    match outcome {
                        Outcome::Responded(status) => debug!("{addr}: {}", status.as_u16()),
                        Outcome::ClientClosed => debug!("{addr}: closed without a request"),
                        Outcome::TimedOut => warn!("{addr}: timed out waiting for request line"),
                    }
                    stats.record(outcome);
                }
                Err(e) => {
                    error!("Error handling connection from {addr}: {e}");
                    stats.record_aborted();
                }
            }
            // Dropping the socket closes the connection.
        });
    }

    /// Log an accept failure and back off briefly.
    async fn handle_accept_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        // Wait for all tasks to complete (with timeout)
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let drained = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!("Aborting {len} connections still open after {shutdown_timeout:?}", len = tasks.len());
            tasks.abort_all();
        }

        info!("Server shutdown complete");
    }
}
