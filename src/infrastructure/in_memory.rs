use crate::domain::event::LocEvent;
use crate::domain::letter::{LetterId, LetterOfCredit};
use crate::domain::participant::{Bank, BankId, Person, PersonId};
use crate::domain::ports::{EventSink, LetterStore, ParticipantDirectory};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for letters of credit.
///
/// Uses `Arc<RwLock<HashMap<LetterId, LetterOfCredit>>>` to allow shared concurrent access.
/// Ideal for testing or single-run processing where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryLetterStore {
    letters: Arc<RwLock<HashMap<LetterId, LetterOfCredit>>>,
}

impl InMemoryLetterStore {
    /// Creates a new, empty in-memory letter store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LetterStore for InMemoryLetterStore {
    async fn store(&self, letter: LetterOfCredit) -> Result<()> {
        let mut letters = self.letters.write().await;
        letters.insert(letter.letter_id.clone(), letter);
        Ok(())
    }

    async fn get(&self, letter_id: &LetterId) -> Result<Option<LetterOfCredit>> {
        let letters = self.letters.read().await;
        Ok(letters.get(letter_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<LetterOfCredit>> {
        let letters = self.letters.read().await;
        Ok(letters.values().cloned().collect())
    }
}

/// In-memory registry of banks and people.
#[derive(Default, Clone)]
pub struct InMemoryParticipantDirectory {
    banks: Arc<RwLock<HashMap<BankId, Bank>>>,
    people: Arc<RwLock<HashMap<PersonId, Person>>>,
}

impl InMemoryParticipantDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantDirectory for InMemoryParticipantDirectory {
    async fn store_bank(&self, bank: Bank) -> Result<()> {
        let mut banks = self.banks.write().await;
        banks.insert(bank.id.clone(), bank);
        Ok(())
    }

    async fn get_bank(&self, bank_id: &BankId) -> Result<Option<Bank>> {
        let banks = self.banks.read().await;
        Ok(banks.get(bank_id).cloned())
    }

    async fn store_person(&self, person: Person) -> Result<()> {
        let mut people = self.people.write().await;
        people.insert(person.id().clone(), person);
        Ok(())
    }

    async fn get_person(&self, person_id: &PersonId) -> Result<Option<Person>> {
        let people = self.people.read().await;
        Ok(people.get(person_id).cloned())
    }
}

/// Keeps published events in publication order.
///
/// Clones share the same log, so a test can hand one clone to the engine and
/// inspect the other.
#[derive(Default, Clone)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<Vec<LocEvent>>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<LocEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventSink for InMemoryEventLog {
    async fn publish(&self, event: LocEvent) -> Result<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
