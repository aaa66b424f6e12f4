//! ACME DNS
//!
//! A tiny authoritative DNS responder for [RFC-8555][RFC-8555] [DNS-01] challenges.
//!
//! An ACME client hook writes challenge tokens to a flat [zone file][zone] and the
//! [DNS responder][dns] serves them as `TXT` records under `_acme-challenge.<domain>.` while the
//! certificate authority validates. The file is re-read for every query, so there is nothing to
//! reload or restart when tokens change.
//!
//! [RFC-8555]: https://www.rfc-editor.org/rfc/rfc8555
//! [DNS-01]: https://www.rfc-editor.org/rfc/rfc8555#section-8.4
//!
#![warn(clippy::pedantic)]

pub mod config;
pub mod dns;
pub mod error;
pub mod zone;

pub use config::{Config, SharedConfig};
pub use dns::Listener;
pub use zone::{FileZoneStore, InMemoryZoneStore, ZoneMap};
