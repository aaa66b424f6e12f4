//! Error types.

use std::net::SocketAddr;
use std::path::PathBuf;
use trust_dns_proto::error::ProtoError;

/// Error enumerates the possible ACME DNS responder error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when the zone file can't be opened or read while answering a query. The query
    /// in flight goes unanswered; the next query tries the file again.
    #[error("zone file {path:?} is unavailable")]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Returned when a received datagram can't be decoded as a DNS message.
    #[error("malformed DNS query")]
    MalformedQuery(#[source] ProtoError),

    /// Returned when a received DNS message doesn't carry exactly one question.
    #[error("malformed DNS query: expected 1 question, found {0}")]
    UnexpectedQuestionCount(usize),

    /// Returned when the [`Listener`][crate::dns::server::Listener] can't bind its UDP socket,
    /// e.g. because the port is in use or the process lacks the privilege to bind port 53.
    #[error("failed to bind DNS socket to {addr}")]
    SocketBind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [loading a `Config`][crate::config::Config::try_from_file] fails due to
    /// invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when a DNS response can't be encoded, e.g. for a token longer than a single
    /// DNS character-string allows.
    #[error("DNS error")]
    DNSError(#[from] ProtoError),
}
