use crate::domain::letter::{LetterId, LetterOfCredit};
use crate::domain::participant::{Bank, BankId, Person, PersonId};
use crate::domain::ports::{LetterStore, ParticipantDirectory};
use crate::error::{LocError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing letters of credit.
pub const CF_LETTERS: &str = "letters";
/// Column Family for storing banks.
pub const CF_BANKS: &str = "banks";
/// Column Family for storing people.
pub const CF_PEOPLE: &str = "people";

/// A persistent store implementation using RocksDB.
///
/// Letters, banks and people live in separate Column Families, keyed by their
/// identifier and encoded as JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [CF_LETTERS, CF_BANKS, CF_PEOPLE]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            LocError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn put_json<T: Serialize>(&self, cf_name: &str, key: &str, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(cf, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, cf_name: &str, key: &str) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl LetterStore for RocksDBStore {
    async fn store(&self, letter: LetterOfCredit) -> Result<()> {
        self.put_json(CF_LETTERS, letter.letter_id.as_str(), &letter)
    }

    async fn get(&self, letter_id: &LetterId) -> Result<Option<LetterOfCredit>> {
        self.get_json(CF_LETTERS, letter_id.as_str())
    }

    async fn get_all(&self) -> Result<Vec<LetterOfCredit>> {
        let cf = self.cf(CF_LETTERS)?;

        let mut letters = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            letters.push(serde_json::from_slice(&value)?);
        }

        Ok(letters)
    }
}

#[async_trait]
impl ParticipantDirectory for RocksDBStore {
    async fn store_bank(&self, bank: Bank) -> Result<()> {
        self.put_json(CF_BANKS, bank.id.as_str(), &bank)
    }

    async fn get_bank(&self, bank_id: &BankId) -> Result<Option<Bank>> {
        self.get_json(CF_BANKS, bank_id.as_str())
    }

    async fn store_person(&self, person: Person) -> Result<()> {
        self.put_json(CF_PEOPLE, person.id().as_str(), &person)
    }

    async fn get_person(&self, person_id: &PersonId) -> Result<Option<Person>> {
        self.get_json(CF_PEOPLE, person_id.as_str())
    }
}
