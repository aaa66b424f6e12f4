use crate::config::Config;
use crate::dns::handlers::Handler;
use crate::error::Error;
use crate::zone::DynZoneStore;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

/// Largest datagram accepted from a client.
pub const MAX_DATAGRAM_SIZE: usize = 65_536;

/// Pause after consecutive receive errors: doubles from 10ms up to 1s, and starts over once a
/// datagram is received.
#[derive(Debug, Default)]
struct RecvBackoff {
    current: Option<Duration>,
}

impl RecvBackoff {
    const INITIAL: Duration = Duration::from_millis(10);
    const MAX: Duration = Duration::from_secs(1);

    fn next_delay(&mut self) -> Duration {
        let delay = self
            .current
            .map_or(Self::INITIAL, |current| (current * 2).min(Self::MAX));
        self.current = Some(delay);
        delay
    }

    fn reset(&mut self) {
        self.current = None;
    }
}

/// Owns the UDP socket and feeds each received datagram to the [`Handler`], one at a time.
pub struct Listener {
    socket: UdpSocket,
    handler: Handler,
}

impl Listener {
    /// Bind the UDP socket configured by [`Config::dns_udp_bind_addr`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::SocketBind`] if the address can't be bound.
    pub async fn bind(config: &Config, zone_store: DynZoneStore) -> Result<Self, Error> {
        let addr = config.dns_udp_bind_addr;
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| Error::SocketBind { addr, source })?;
        Ok(Listener {
            socket,
            handler: Handler::new(zone_store),
        })
    }

    /// The address the socket is actually bound to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the socket address can't be queried.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.socket.local_addr()?)
    }

    /// Serve queries until the future is dropped. Failures are contained to the datagram that
    /// caused them.
    pub async fn run(self) {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let mut backoff = RecvBackoff::default();
        loop {
            let (len, src) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => {
                    backoff.reset();
                    received
                }
                Err(err) => {
                    let delay = backoff.next_delay();
                    tracing::error!("DNS recv error, retrying in {delay:?}: {err}");
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };

            let Some(response) = self.handler.handle(&buf[..len], src).await else {
                continue;
            };
            if let Err(err) = self.socket.send_to(&response, src).await {
                tracing::error!("failed to send DNS response to {src}: {err}");
            }
        }
    }
}
