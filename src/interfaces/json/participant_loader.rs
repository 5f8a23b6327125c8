use crate::domain::participant::{Bank, Person};
use crate::domain::ports::ParticipantDirectory;
use crate::error::{LocError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use tracing::debug;

/// Banks and people to provision before any action is processed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSetup {
    #[serde(default)]
    pub banks: Vec<Bank>,
    #[serde(default)]
    pub people: Vec<Person>,
}

impl ParticipantSetup {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    /// Stores every bank, then every person. A person whose bank is neither in
    /// this setup nor already registered is refused.
    pub async fn load_into(self, directory: &dyn ParticipantDirectory) -> Result<()> {
        let declared: HashSet<_> = self.banks.iter().map(|b| b.id.clone()).collect();
        for bank in self.banks {
            debug!(bank = %bank.id, "Registering bank");
            directory.store_bank(bank).await?;
        }
        for person in self.people {
            if !declared.contains(person.bank_id())
                && directory.get_bank(person.bank_id()).await?.is_none()
            {
                return Err(LocError::UnknownBank(person.bank_id().clone()));
            }
            debug!(person = %person.id(), kind = ?person.kind(), "Registering participant");
            directory.store_person(person).await?;
        }
        Ok(())
    }
}
