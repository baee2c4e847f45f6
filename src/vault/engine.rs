//! High-level vault operations.
//!
//! `VaultEngine` composes the cipher, the id allocator, and the record
//! store.  It is the only surface callers use: they never reach the
//! store or the cipher directly.  The key is passed into every call that
//! needs it and is never kept between calls.
//!
//! Mutating operations take `&mut self`, so allocation and insertion (or
//! deletion and release) cannot interleave on a single engine.

use std::path::Path;

use zeroize::Zeroizing;

use crate::crypto::cipher;
use crate::errors::{LockboxError, Result};

use super::ids::IdAllocator;
use super::record::Record;
use super::store::RecordStore;

/// The vault handle.  Create one with `VaultEngine::open`, then use its
/// methods to manage records.
pub struct VaultEngine {
    store: RecordStore,
    ids: IdAllocator,
}

impl VaultEngine {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the database at `db_path`, creating the table if needed.
    pub fn open(db_path: &Path) -> Result<Self> {
        Self::with_store(RecordStore::open(db_path)?)
    }

    /// Build an engine on an already opened store.
    ///
    /// Ensures the schema and seeds the allocator from the stored ids.
    pub fn with_store(store: RecordStore) -> Result<Self> {
        store.ensure_schema()?;
        let mut engine = Self {
            store,
            ids: IdAllocator::default(),
        };
        engine.load_all()?;
        Ok(engine)
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Load every record and re-seed the id allocator from their ids.
    ///
    /// Records come back with their secrets still encrypted.
    pub fn load_all(&mut self) -> Result<Vec<Record>> {
        let records = self.store.select_all()?;
        self.ids = IdAllocator::initialize(records.iter().map(|r| r.id));

        tracing::debug!(
            count = records.len(),
            max_id = self.ids.max_id(),
            free = self.ids.free_count(),
            "loaded records"
        );
        Ok(records)
    }

    /// Encrypt and store a new credential.
    ///
    /// `site` and `username` must be non-blank.  Validation and
    /// encryption happen before anything is written, so a failure leaves
    /// no partial record behind.  Returns the stored record, with the
    /// secret encrypted.
    pub fn add(
        &mut self,
        site: &str,
        username: &str,
        secret_plaintext: &str,
        key: &str,
    ) -> Result<Record> {
        if site.trim().is_empty() {
            return Err(LockboxError::InvalidInput("site cannot be empty".into()));
        }
        if username.trim().is_empty() {
            return Err(LockboxError::InvalidInput(
                "username cannot be empty".into(),
            ));
        }

        let secret_ciphertext = cipher::encrypt(secret_plaintext, key)?;

        let id = self.ids.allocate();
        let record = Record {
            id,
            site: site.to_string(),
            username: username.to_string(),
            secret_ciphertext,
        };

        match self.store.insert(&record) {
            Ok(()) => {}
            // The id is taken in storage; it must not go back to the pool.
            Err(e @ LockboxError::DuplicateId(_)) => {
                tracing::warn!(id, "allocator issued an id already present in storage");
                return Err(e);
            }
            Err(e) => {
                self.ids.release(id);
                return Err(e);
            }
        }

        tracing::info!(id, site = %record.site, "record added");
        Ok(record)
    }

    /// Decrypt the secret of record `id` with `key`.
    ///
    /// Fails with `NotFound` if there is no such record, and with
    /// `InvalidKeyOrCiphertext` if the key is wrong or the stored data
    /// is damaged.
    pub fn reveal(&self, id: i64, key: &str) -> Result<Zeroizing<String>> {
        let record = self.get(id)?;
        self.reveal_record(&record, key)
    }

    /// Decrypt the secret of a record already fetched with `get`.
    pub fn reveal_record(&self, record: &Record, key: &str) -> Result<Zeroizing<String>> {
        let id = record.id;
        let plaintext = cipher::decrypt(&record.secret_ciphertext, key).map_err(|e| {
            tracing::warn!(id, "decryption failed");
            e
        })?;

        tracing::info!(id, "secret revealed");
        Ok(plaintext)
    }

    /// Delete record `id` and recycle its id.
    ///
    /// Removing an id that does not exist succeeds and changes nothing.
    pub fn remove(&mut self, id: i64) -> Result<()> {
        if self.store.delete(id)? {
            self.ids.release(id);
            tracing::info!(id, "record removed");
        } else {
            tracing::debug!(id, "remove: no such record");
        }
        Ok(())
    }

    /// Fetch a record (secret still encrypted).
    pub fn get(&self, id: i64) -> Result<Record> {
        self.store
            .select_by_id(id)?
            .ok_or(LockboxError::NotFound(id))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of stored records.
    pub fn len(&self) -> Result<usize> {
        self.store.count()
    }

    /// Read-only view of the id allocator.
    pub fn allocator(&self) -> &IdAllocator {
        &self.ids
    }
}
