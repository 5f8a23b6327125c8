use super::event::LocEvent;
use super::letter::{LetterId, LetterOfCredit};
use super::participant::{Bank, BankId, Person, PersonId};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LetterStore: Send + Sync {
    async fn store(&self, letter: LetterOfCredit) -> Result<()>;
    async fn get(&self, letter_id: &LetterId) -> Result<Option<LetterOfCredit>>;
    async fn get_all(&self) -> Result<Vec<LetterOfCredit>>;
}

/// Registry of banks and people, provisioned before any letter is processed.
#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    async fn store_bank(&self, bank: Bank) -> Result<()>;
    async fn get_bank(&self, bank_id: &BankId) -> Result<Option<Bank>>;
    async fn store_person(&self, person: Person) -> Result<()>;
    async fn get_person(&self, person_id: &PersonId) -> Result<Option<Person>>;
}

/// Receives events after the state change they describe has been stored.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, event: LocEvent) -> Result<()>;
}

pub type LetterStoreBox = Box<dyn LetterStore>;
pub type ParticipantDirectoryBox = Box<dyn ParticipantDirectory>;
pub type EventSinkBox = Box<dyn EventSink>;
