//! Challenge zone storage.
//!
//! A zone file is plain text whose lines alternate between a domain name and an
//! [RFC-8555][RFC-8555] [DNS-01] challenge token:
//!
//! ```text
//! example.com.
//! LPsIwTo7o8BoG0-vjCyGQGBWSVIPxI-i_X336eUOQZo
//! example.com
//! 1bVdzR8o1pNQp6VUvZfiu3dsZSjWXVjg8F8Z4Fg6R1o
//! ```
//!
//! Each name is published as `_acme-challenge.<name>.`, lowercased. Repeating a name publishes
//! several tokens for it at once, in file order. Blank lines are skipped, and a trailing name
//! with no token after it is ignored.
//!
//! The file is owned by an external writer which must replace it atomically (write a temporary
//! file, then rename it into place). Nothing here caches its content: every
//! [`ZoneStore::load`] produces a new, independent [`ZoneMap`].
//!
//! [RFC-8555]: https://www.rfc-editor.org/rfc/rfc8555
//! [DNS-01]: https://www.rfc-editor.org/rfc/rfc8555#section-8.4

use crate::error::Error;
use std::collections::HashMap;
use std::sync::Arc;

pub mod file;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use file::FileZoneStore;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryZoneStore;

/// Label prepended to every name read from a zone file.
pub const CHALLENGE_LABEL: &str = "_acme-challenge.";

/// `DynZoneStore` is a type alias for a [`ZoneStore`] shared between consumers through an
/// [`Arc`]. Stores are read-only, so no lock is needed.
#[allow(clippy::module_name_repetitions)]
pub type DynZoneStore = Arc<dyn ZoneStore + Send + Sync>;

/// An async trait describing a source of challenge zones, keyed by the fully qualified challenge
/// name they should be served for in the [DNS responder][crate::dns].
#[async_trait::async_trait]
pub trait ZoneStore {
    /// Load a fresh [`ZoneMap`].
    async fn load(&self) -> Result<ZoneMap, Error>;
}

/// Mapping from lowercased challenge FQDN to the tokens published for it, in file order.
///
/// A name is only present with at least one token.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ZoneMap {
    records: HashMap<String, Vec<String>>,
}

impl ZoneMap {
    /// Parse zone file content into a [`ZoneMap`]. Never fails: an empty input is an empty map.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        let lines: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut zone = ZoneMap::default();
        let mut pairs = lines.chunks_exact(2);
        for pair in pairs.by_ref() {
            zone.insert(pair[0], pair[1].to_string());
        }
        if let [dangling] = pairs.remainder() {
            tracing::warn!("ignoring zone name \"{dangling}\" with no token");
        }
        zone
    }

    /// Append a token for the given zone file name. The name is normalized with
    /// [`challenge_name`].
    pub fn insert(&mut self, name: &str, token: String) {
        self.records
            .entry(challenge_name(name))
            .or_default()
            .push(token);
    }

    /// Get the tokens for a lowercased challenge FQDN (if any).
    #[must_use]
    pub fn get(&self, fqdn: &str) -> Option<&[String]> {
        self.records.get(fqdn).map(Vec::as_slice)
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of tokens across all names.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }
}

/// Turn a zone file name into the challenge FQDN it is served under, e.g. `Example.com` becomes
/// `_acme-challenge.example.com.`.
#[must_use]
pub fn challenge_name(name: &str) -> String {
    let name = name.trim().to_lowercase();
    if name.ends_with('.') {
        format!("{CHALLENGE_LABEL}{name}")
    } else {
        format!("{CHALLENGE_LABEL}{name}.")
    }
}
