use anyhow::{Context, Result};
use listenfd::ListenFd;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use duallist_types::models::ServerConfig;

/// Listening socket for the items API.
///
/// An inherited socket (systemd activation or `systemfd`) wins over the
/// configured address, so a supervisor can hand the port over between
/// restarts without dropping connections.
pub fn create_listener(server: &ServerConfig) -> Result<TcpListener> {
    if let Some(listener) = inherited_listener(&mut ListenFd::from_env())? {
        info!("🔌 Using inherited socket {}", listener.local_addr()?);
        return Ok(listener);
    }

    let listener = bind_listener(configured_addr(server)?, server)?;
    info!(
        "🔌 Bound {} (backlog {}, reuse_port {})",
        listener.local_addr()?,
        server.listen_backlog,
        server.reuse_port
    );
    Ok(listener)
}

fn inherited_listener(fds: &mut ListenFd) -> Result<Option<TcpListener>> {
    let Some(listener) = fds.take_tcp_listener(0).context("inherited fd 0 is not a TCP socket")?
    else {
        return Ok(None);
    };
    listener.set_nonblocking(true)?;
    Ok(Some(TcpListener::from_std(listener)?))
}

fn configured_addr(server: &ServerConfig) -> Result<SocketAddr> {
    let host = server.get_bind_address();
    let ip: IpAddr = host.parse().with_context(|| format!("invalid bind address '{host}'"))?;
    Ok(SocketAddr::new(ip, server.port))
}

fn bind_listener(addr: SocketAddr, server: &ServerConfig) -> Result<TcpListener> {
    let domain = if addr.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    if server.reuse_port {
        socket.set_reuse_port(true)?;
    }
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into()).with_context(|| format!("failed to bind {addr}"))?;
    let backlog = i32::try_from(server.listen_backlog).unwrap_or(i32::MAX);
    socket.listen(backlog)?;

    Ok(TcpListener::from_std(socket.into())?)
}

#[allow(
    clippy::expect_used,
    reason = "Signal handlers are critical infrastructure, panic is appropriate on failure"
)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("🛑 Received Ctrl+C, shutting down..."),
        () = terminate => info!("🛑 Received SIGTERM, shutting down..."),
    }

    info!("⏳ Waiting for open requests, then draining mutation queues...");
}
