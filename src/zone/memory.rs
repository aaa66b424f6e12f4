use crate::error::Error;
use crate::zone::{ZoneMap, ZoneStore};

/// A zone store serving a fixed [`ZoneMap`]. Every load hands out an independent copy.
#[derive(Default, Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct InMemoryZoneStore {
    zone: ZoneMap,
}

impl InMemoryZoneStore {
    #[must_use]
    pub fn new(zone: ZoneMap) -> Self {
        Self { zone }
    }
}

#[async_trait::async_trait]
impl ZoneStore for InMemoryZoneStore {
    async fn load(&self) -> Result<ZoneMap, Error> {
        Ok(self.zone.clone())
    }
}
