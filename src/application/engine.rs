use crate::domain::action::Action;
use crate::domain::approval::ApprovalPolicy;
use crate::domain::event::LocEvent;
use crate::domain::letter::{LetterId, LetterOfCredit};
use crate::domain::participant::{Person, PersonId};
use crate::domain::ports::{EventSinkBox, LetterStoreBox, ParticipantDirectoryBox};
use crate::domain::transition::{Transition, initial_application};
use crate::error::{LocError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The main entry point for processing letter-of-credit actions.
///
/// `LetterEngine` owns the storage, participant registry and event sink. Each
/// action runs as a read-modify-write of a single letter while holding that
/// letter's lock, so actions on the same letter are serialized and actions on
/// different letters proceed independently.
pub struct LetterEngine {
    letters: LetterStoreBox,
    participants: ParticipantDirectoryBox,
    events: EventSinkBox,
    policy: ApprovalPolicy,
    letter_locks: Mutex<HashMap<LetterId, Arc<Mutex<()>>>>,
}

impl LetterEngine {
    /// Creates a new `LetterEngine` using the standard approval policy.
    ///
    /// # Arguments
    ///
    /// * `letters` - The store for letters of credit.
    /// * `participants` - The registry used to resolve banks and people.
    /// * `events` - The sink receiving an event per successful action.
    pub fn new(
        letters: LetterStoreBox,
        participants: ParticipantDirectoryBox,
        events: EventSinkBox,
    ) -> Self {
        Self {
            letters,
            participants,
            events,
            policy: ApprovalPolicy::STANDARD,
            letter_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_policy(mut self, policy: ApprovalPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn participants(&self) -> &ParticipantDirectoryBox {
        &self.participants
    }

    /// Applies an action to the letter it addresses.
    ///
    /// On success the updated letter is persisted before the event is
    /// published, and the event is returned. On failure nothing is written.
    pub async fn process_action(&self, action: Action) -> Result<LocEvent> {
        let letter_id = action.letter_id().clone();
        let kind = action.kind();

        let lock = self.lock_for(&letter_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.apply(&letter_id, kind, action).await
        };
        self.release_lock(&letter_id, lock).await;
        result
    }

    async fn apply(&self, letter_id: &LetterId, kind: &str, action: Action) -> Result<LocEvent> {
        let current = self.letters.get(letter_id).await?;
        debug!(letter = %letter_id, action = kind, found = current.is_some(), "Loaded letter");

        let transition = match self.transition(current, action).await {
            Ok(transition) => transition,
            Err(e) => {
                warn!(letter = %letter_id, action = kind, code = e.code(), "Action refused: {}", e);
                return Err(e);
            }
        };

        let Transition { letter, event } = transition;
        let status = letter.status;
        self.letters.store(letter).await?;
        debug!(letter = %letter_id, "Persisted letter");

        self.events.publish(event.clone()).await?;
        info!(letter = %letter_id, event = event.name(), %status, "Applied action");

        Ok(event)
    }

    async fn transition(&self, current: Option<LetterOfCredit>, action: Action) -> Result<Transition> {
        match action {
            Action::InitialApplication {
                letter_id,
                applicant,
                beneficiary,
                rules,
                product_details,
            } => {
                current.as_ref().map(LetterOfCredit::ensure_open).transpose()?;
                let applicant = self.resolve(&applicant).await?;
                let beneficiary = self.resolve(&beneficiary).await?;
                for person in [&applicant, &beneficiary] {
                    if self.participants.get_bank(person.bank_id()).await?.is_none() {
                        return Err(LocError::UnknownBank(person.bank_id().clone()));
                    }
                }
                initial_application(
                    current.as_ref(),
                    letter_id,
                    &applicant,
                    &beneficiary,
                    rules,
                    product_details,
                )
            }
            Action::Approve {
                letter_id,
                approver,
            } => {
                let letter = loaded(current, letter_id)?;
                letter.ensure_open()?;
                letter.approve(&self.resolve(&approver).await?, &self.policy)
            }
            Action::Reject {
                letter_id,
                actor,
                close_reason,
            } => {
                let letter = loaded(current, letter_id)?;
                letter.ensure_open()?;
                letter.reject(&self.resolve(&actor).await?, close_reason)
            }
            Action::SuggestChanges {
                letter_id,
                suggester,
                rules,
            } => {
                let letter = loaded(current, letter_id)?;
                letter.ensure_open()?;
                letter.suggest_changes(&self.resolve(&suggester).await?, rules)
            }
            Action::ShipProduct {
                letter_id,
                actor,
                evidence,
            } => {
                let letter = loaded(current, letter_id)?;
                letter.ensure_open()?;
                letter.ship_product(&self.resolve(&actor).await?, evidence)
            }
            Action::ReceiveProduct { letter_id, actor } => {
                let letter = loaded(current, letter_id)?;
                letter.ensure_open()?;
                letter.receive_product(&self.resolve(&actor).await?)
            }
            Action::ReadyForPayment { letter_id, actor } => {
                let letter = loaded(current, letter_id)?;
                letter.ensure_open()?;
                letter.ready_for_payment(&self.resolve(&actor).await?)
            }
            Action::Close {
                letter_id,
                actor,
                close_reason,
            } => {
                let letter = loaded(current, letter_id)?;
                letter.ensure_open()?;
                letter.close(&self.resolve(&actor).await?, close_reason)
            }
        }
    }

    async fn resolve(&self, person_id: &PersonId) -> Result<Person> {
        self.participants
            .get_person(person_id)
            .await?
            .ok_or_else(|| LocError::UnknownParticipant(person_id.clone()))
    }

    async fn lock_for(&self, letter_id: &LetterId) -> Arc<Mutex<()>> {
        let mut locks = self.letter_locks.lock().await;
        locks.entry(letter_id.clone()).or_default().clone()
    }

    /// Drops the map entry once no other caller holds or waits on the lock.
    async fn release_lock(&self, letter_id: &LetterId, lock: Arc<Mutex<()>>) {
        let mut locks = self.letter_locks.lock().await;
        if Arc::strong_count(&lock) == 2 {
            locks.remove(letter_id);
        }
    }

    /// Returns the current state of a letter.
    pub async fn letter(&self, letter_id: &LetterId) -> Result<LetterOfCredit> {
        self.letters
            .get(letter_id)
            .await?
            .ok_or_else(|| LocError::NotFound(letter_id.clone()))
    }

    /// Consumes the engine and returns the final state of all letters, ordered by id.
    pub async fn into_results(self) -> Result<Vec<LetterOfCredit>> {
        let mut letters = self.letters.get_all().await?;
        letters.sort_by(|a, b| a.letter_id.cmp(&b.letter_id));
        Ok(letters)
    }
}

fn loaded(current: Option<LetterOfCredit>, letter_id: LetterId) -> Result<LetterOfCredit> {
    current.ok_or(LocError::NotFound(letter_id))
}
