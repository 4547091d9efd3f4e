//! Connection establishment
//!
//! Opens the stream a session runs over. Tests swap in their own connector.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Opens one fresh stream per exchange
pub trait Connector {
    type Stream: Read + Write;

    /// Open a new connection to the server
    fn connect(&self) -> Result<Self::Stream>;

    /// Tear a connection down. Dropping the stream is enough by default.
    fn disconnect(&self, stream: Self::Stream) {
        drop(stream);
    }

    /// Peer description for logging
    fn peer(&self) -> String;
}

/// Connects over TCP to the configured host and port
#[derive(Debug, Clone)]
pub struct TcpConnector {
    host: String,
    port: u16,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl TcpConnector {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            connect_timeout: config.connect_timeout(),
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
        }
    }

    /// Disable Nagle and apply read/write timeouts
    fn configure(&self, stream: TcpStream) -> io::Result<TcpStream> {
        stream.set_nodelay(true)?;
        stream.set_read_timeout(self.read_timeout)?;
        stream.set_write_timeout(self.write_timeout)?;
        Ok(stream)
    }

    fn connect_addr(&self, addr: &std::net::SocketAddr) -> io::Result<TcpStream> {
        match self.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(addr, timeout),
            None => TcpStream::connect(addr),
        }
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self) -> Result<TcpStream> {
        let peer = self.peer();
        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| ClientError::HostUnreachable {
                addr: peer.clone(),
                source,
            })?;

        // `localhost` usually resolves to both ::1 and 127.0.0.1; the server
        // may only listen on one of them.
        let mut last_err = None;
        for addr in addrs {
            match self.connect_addr(&addr) {
                Ok(stream) => {
                    tracing::debug!("Connected to {} ({})", peer, addr);
                    return self.configure(stream).map_err(ClientError::Io);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        let err = last_err.unwrap_or_else(|| {
            io::Error::new(ErrorKind::NotFound, "host resolved to no addresses")
        });
        Err(map_connect_error(peer, err))
    }

    fn disconnect(&self, stream: TcpStream) {
        // NotConnected just means the peer already went away
        if let Err(e) = stream.shutdown(Shutdown::Both) {
            if e.kind() != ErrorKind::NotConnected {
                tracing::debug!("Shutdown of {} failed: {}", self.peer(), e);
            }
        }
    }

    fn peer(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn map_connect_error(addr: String, err: io::Error) -> ClientError {
    match err.kind() {
        ErrorKind::ConnectionRefused => ClientError::ConnectionRefused { addr },
        ErrorKind::TimedOut | ErrorKind::WouldBlock => ClientError::ConnectionTimeout { addr },
        _ => ClientError::HostUnreachable { addr, source: err },
    }
}
