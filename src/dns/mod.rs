//! Authoritative DNS responder for `_acme-challenge` TXT records.
//!
//! The responder answers exactly one kind of question: a `TXT` query for a name present in the
//! [zone file][crate::zone]. The zone file is read again for every such query, so a token
//! written by the ACME client's hook is served from the very next query without a restart.
//!
//! E.g. with the zone file:
//!
//! ```text
//! example.com.
//! TOKEN-A
//! example.com.
//! TOKEN-B
//! ```
//!
//! A `TXT` query for `_acme-challenge.example.com` would return:
//!
//! ```bash
//! ❯ dig @127.0.0.1 +short _acme-challenge.example.com TXT
//! "TOKEN-A"
//! "TOKEN-B"
//! ```
//!
//! Answers are authoritative (`AA`), carry the `RA` flag, and have a TTL of 60 seconds.
//!
//! # Unanswered Queries
//!
//! No datagram at all is sent back for:
//!
//! - queries of any type other than `TXT`,
//! - names with no entry in the zone file,
//! - malformed datagrams, or messages without exactly one question,
//! - messages that aren't plain queries (responses, `NOTIFY`, `UPDATE`, ...),
//! - any query arriving while the zone file can't be read.
//!
//! No `NXDOMAIN`, `NOTIMP` or `SERVFAIL` is ever sent.
//!
//! The parent zone must delegate the challenge name to this server, e.g.:
//!
//! ```text
//! _acme-challenge.example.com. 300 IN NS ns.example.com.
//! ```

pub mod codec;
mod handlers;
pub mod server;

pub use handlers::Handler;
pub use server::Listener;
