use crate::draft::{Draft, DraftId};
use crate::error::{Result, ShowDesignError};
use crate::store::KvStore;
use tracing::{debug, info, warn};

pub const DEFAULT_STORAGE_KEY: &str = "bandShows";

/// Outcome of [`DraftRepository::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Replaced,
    Appended,
}

#[derive(Debug, Default)]
struct Collection {
    drafts: Vec<Draft>,
    unreadable: usize,
}

/// The drafts collection, stored as one JSON array under a single key.
///
/// Every write is a full read-modify-write of the collection.
#[derive(Debug)]
pub struct DraftRepository<S> {
    store: S,
    key: String,
    enforce_lock: bool,
}

impl<S: KvStore> DraftRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            enforce_lock: true,
        }
    }

    /// When enabled (the default), persisted drafts marked locked cannot be
    /// overwritten.
    pub fn with_lock_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_lock = enforce;
        self
    }

    pub fn enforces_lock(&self) -> bool {
        self.enforce_lock
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load every draft. A missing key yields an empty collection; records
    /// that cannot be read are skipped with a warning.
    pub fn load_all(&self) -> Result<Vec<Draft>> {
        Ok(self.load_collection()?.drafts)
    }

    fn load_collection(&self) -> Result<Collection> {
        let Some(raw) = self.store.load(&self.key)? else {
            debug!(key = %self.key, "no saved drafts");
            return Ok(Collection::default());
        };
        let records = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring malformed drafts collection");
                return Ok(Collection {
                    drafts: Vec::new(),
                    unreadable: 1,
                });
            }
        };

        let mut collection = Collection::default();
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Draft>(record) {
                Ok(draft) => collection.drafts.push(draft),
                Err(e) => {
                    warn!(key = %self.key, index, error = %e, "skipping unreadable draft");
                    collection.unreadable += 1;
                }
            }
        }
        debug!(
            key = %self.key,
            count = collection.drafts.len(),
            unreadable = collection.unreadable,
            "loaded drafts"
        );
        Ok(collection)
    }

    pub fn save_all(&mut self, drafts: &[Draft]) -> Result<()> {
        let data = serde_json::to_string(drafts)?;
        self.store.store(&self.key, &data)?;
        info!(key = %self.key, count = drafts.len(), "saved drafts");
        Ok(())
    }

    pub fn find(&self, id: DraftId) -> Result<Option<Draft>> {
        Ok(self.load_all()?.into_iter().find(|d| d.id == id))
    }

    /// Replace the draft with the same id in place, or append it.
    ///
    /// Returns the updated collection as written.
    ///
    /// Refuses to write while the stored collection holds records that could
    /// not be read, so they are never silently dropped.
    pub fn upsert(&mut self, draft: &Draft) -> Result<(Upsert, Vec<Draft>)> {
        let Collection {
            mut drafts,
            unreadable,
        } = self.load_collection()?;
        if unreadable > 0 {
            return Err(ShowDesignError::UnreadableCollection {
                key: self.key.clone(),
                unreadable,
            });
        }
        let outcome = match drafts.iter_mut().find(|d| d.id == draft.id) {
            Some(existing) => {
                if self.enforce_lock && existing.is_locked() {
                    return Err(ShowDesignError::DraftLocked(draft.id));
                }
                *existing = draft.clone();
                Upsert::Replaced
            }
            None => {
                drafts.push(draft.clone());
                Upsert::Appended
            }
        };
        self.save_all(&drafts)?;
        debug!(id = draft.id, ?outcome, "upserted draft");
        Ok((outcome, drafts))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
