use std::error::Error;

use async_trait::async_trait;

use crate::holiday::Holiday;
use crate::store::TaskStore;

/// Somewhere a [`TaskStore`] is persisted between sessions
pub trait TaskPersistence {
    /// Returns the persisted store.
    ///
    /// This fails open: missing or corrupt data results in an empty store (corrupt data is logged)
    fn load(&mut self) -> TaskStore;

    /// Persist the whole store, replacing any previously persisted one
    fn save(&mut self, store: &TaskStore) -> Result<(), Box<dyn Error>>;
}

#[async_trait]
pub trait HolidaySource {
    /// Returns the public holidays of a given year, in the order the source provides them.
    /// This may be a long process, or can even fail, e.g. in case of a remote server
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<Holiday>, Box<dyn Error>>;
}
