//! Probe Client
//!
//! Sends one UDP datagram to a target address and waits for any reply.

use std::io;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

/// Receive buffer size; replies are discarded, only their arrival matters.
const RECV_BUFFER_SIZE: usize = 4096;

/// Default wait for a probe reply, in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

// == Probe Client ==
/// Fire-and-forget UDP liveness prober.
///
/// Each probe opens its own socket; there is no session, no retry, and no
/// validation of the reply payload. The only timeout is the reply wait
/// configured here.
#[derive(Debug, Clone, Copy)]
pub struct ProbeClient {
    /// How long to wait for a reply datagram
    timeout: Duration,
}

impl ProbeClient {
    // == Constructor ==
    /// Creates a client with the given reply timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    // == Probe ==
    /// Sends `payload` to `host:port` and reports whether anything came back.
    ///
    /// Any inbound datagram on the probe socket counts as "online",
    /// regardless of content. A timeout, a send or receive error, or a
    /// failed name resolution all yield `false`; no failure reaches the
    /// caller. An empty payload is legal (some game protocols probe with a
    /// zero-length packet).
    pub async fn probe(&self, payload: &[u8], host: &str, port: u16) -> bool {
        match self.try_probe(payload, host, port).await {
            Ok(online) => online,
            Err(err) => {
                debug!("probe of {}:{} failed: {}", host, port, err);
                false
            }
        }
    }

    async fn try_probe(&self, payload: &[u8], host: &str, port: u16) -> io::Result<bool> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;

        debug!("sending {} byte probe to {}:{}", payload.len(), host, port);
        // send_to resolves hostnames; a resolution failure surfaces here
        // as an io::Error and becomes "not online" like any other failure.
        socket.send_to(payload, (host, port)).await?;

        let mut buf = [0u8; RECV_BUFFER_SIZE];
        match timeout(self.timeout, socket.recv_from(&mut buf)).await {
            Ok(Ok((len, from))) => {
                debug!("received {} bytes from {}", len, from);
                Ok(true)
            }
            Ok(Err(err)) => Err(err),
            Err(_) => {
                debug!("probe of {}:{} timed out", host, port);
                Ok(false)
            }
        }
    }
}

impl Default for ProbeClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    /// Binds a loopback UDP socket that answers every datagram with "pong".
    /// Returns the port it listens on.
    async fn spawn_responder() -> u16 {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = socket.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut buf = [0u8; RECV_BUFFER_SIZE];
            while let Ok((_, from)) = socket.recv_from(&mut buf).await {
                let _ = socket.send_to(b"pong", from).await;
            }
        });
        port
    }

    #[tokio::test]
    async fn test_probe_reply_means_online() {
        let port = spawn_responder().await;
        let client = ProbeClient::new(Duration::from_secs(2));

        assert!(client.probe(b"status?", "127.0.0.1", port).await);
    }

    #[tokio::test]
    async fn test_probe_empty_payload_is_permitted() {
        let port = spawn_responder().await;
        let client = ProbeClient::new(Duration::from_secs(2));

        assert!(client.probe(b"", "127.0.0.1", port).await);
    }

    #[tokio::test]
    async fn test_probe_silent_target_times_out() {
        // Bound but never answered, so the probe has to run out its timeout
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = silent.local_addr().unwrap().port();

        let client = ProbeClient::new(Duration::from_millis(300));
        let started = Instant::now();

        assert!(!client.probe(b"status?", "127.0.0.1", port).await);

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_probe_resolution_failure_is_offline() {
        let client = ProbeClient::new(Duration::from_secs(2));

        assert!(
            !client
                .probe(b"status?", "no-such-host.invalid", 5121)
                .await
        );
    }
}
