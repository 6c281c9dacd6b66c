//! Command line entry point for the tinyhttpd file server.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use tinyhttpd::{HttpServer, ServerConfig, ServerError};

/// Serve files from a directory over HTTP/1.0.
#[derive(Debug, Parser)]
#[command(name = "tinyhttpd", version, about)]
struct Args {
    /// JSON configuration file. Command line options override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "TINYHTTPD_HOST")]
    host: Option<IpAddr>,

    /// Port to listen on (0 picks a free port)
    #[arg(short, long, env = "TINYHTTPD_PORT")]
    port: Option<u16>,

    /// Directory to serve files from
    #[arg(short, long, env = "TINYHTTPD_ROOT")]
    root: Option<PathBuf>,

    /// Maximum number of connections served at once
    #[arg(long)]
    max_connections: Option<usize>,

    /// Milliseconds a client may take to send its request line
    #[arg(long)]
    read_timeout_ms: Option<u64>,

    /// Value of the Server header
    #[arg(long)]
    server_name: Option<String>,
}

impl Args {
    /// Build the server configuration: defaults, then the file, then flags.
    fn into_config(self) -> Result<ServerConfig, ServerError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_json_file(path)?,
            None => ServerConfig::default(),
        };

        let host = self.host.unwrap_or(config.addr.ip());
        let port = self.port.unwrap_or(config.addr.port());
        config.addr = SocketAddr::new(host, port);

        if let Some(root) = self.root {
            config.document_root = root;
        }
        if let Some(max_connections) = self.max_connections {
            config.max_connections = max_connections;
        }
        if let Some(read_timeout_ms) = self.read_timeout_ms {
            config.read_timeout_ms = read_timeout_ms;
        }
        if let Some(server_name) = self.server_name {
            config.server_name = server_name;
        }

        Ok(config)
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let server = HttpServer::new(args.into_config()?)?;
    let listener = server.bind().await?;
    println!("Port number is: {}", listener.local_addr()?.port());
    server.start_with(listener).await
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
