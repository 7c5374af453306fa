//! Server mode CLI logic
//!
//! Contains the core logic for running the HTTP server mode.

use crate::{Settings, server::app, utils::version};
use anyhow::Result;

/// Arguments for server mode; `None` keeps the configured value
#[derive(Debug, Default)]
pub struct ServerArgs {
    pub port: Option<u16>,
    pub host: Option<String>,
}

/// Run server mode with the given settings and overrides
pub async fn run_server_mode(mut settings: Settings, args: ServerArgs) -> Result<()> {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    tracing::info!("Starting docsite server v{}", version::get_version());

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let app = app::create_app(settings)?;

    let addr = parse_and_bind_address(&host, port).await?;

    tracing::info!(
        "docsite server v{} listening on {}",
        version::get_version(),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse host string and attempt to bind to the address
///
/// - An IP literal is used as is
/// - `::` is tried first and falls back to `0.0.0.0` when IPv6 is unavailable
pub async fn parse_and_bind_address(host: &str, port: u16) -> Result<std::net::SocketAddr> {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

    if let Ok(ip) = host.parse::<IpAddr>() {
        let addr = SocketAddr::new(ip, port);
        tracing::debug!("Parsed address: {}", addr);
        // `::` still goes through the IPv4 fallback below
        if !(ip.is_ipv6() && ip.is_unspecified()) {
            return Ok(addr);
        }
    }

    match host {
        "::" => {
            let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port);
            tracing::debug!("Using IPv6 any address: {}", addr);

            match tokio::net::TcpListener::bind(addr).await {
                Ok(_) => {
                    tracing::info!("Successfully bound to IPv6 address {}", addr);
                    Ok(addr)
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not listen on [::]:{} (Caused by {}), falling back to 0.0.0.0",
                        port,
                        e
                    );
                    let fallback_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
                    tracing::info!("Using IPv4 fallback address: {}", fallback_addr);
                    Ok(fallback_addr)
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid host address: {}. Use an IP address, '::' for IPv6 or '0.0.0.0' for IPv4",
                host
            );
        }
    }
}
