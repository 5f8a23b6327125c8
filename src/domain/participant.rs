use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a participant acting on a letter of credit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a bank institution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BankId(String);

impl BankId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub id: BankId,
    pub name: String,
}

impl Bank {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: BankId::new(id),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonKind {
    Customer,
    BankEmployee,
}

/// A participant in the workflow. Every person belongs to exactly one bank;
/// customers are that bank's clients, employees sign on its behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Person {
    Customer {
        id: PersonId,
        name: String,
        bank: BankId,
        company_name: String,
    },
    BankEmployee {
        id: PersonId,
        name: String,
        bank: BankId,
    },
}

impl Person {
    pub fn customer(
        id: impl Into<String>,
        name: impl Into<String>,
        bank: impl Into<String>,
        company_name: impl Into<String>,
    ) -> Self {
        Person::Customer {
            id: PersonId::new(id),
            name: name.into(),
            bank: BankId::new(bank),
            company_name: company_name.into(),
        }
    }

    pub fn employee(id: impl Into<String>, name: impl Into<String>, bank: impl Into<String>) -> Self {
        Person::BankEmployee {
            id: PersonId::new(id),
            name: name.into(),
            bank: BankId::new(bank),
        }
    }

    pub fn id(&self) -> &PersonId {
        match self {
            Person::Customer { id, .. } | Person::BankEmployee { id, .. } => id,
        }
    }

    pub fn bank_id(&self) -> &BankId {
        match self {
            Person::Customer { bank, .. } | Person::BankEmployee { bank, .. } => bank,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Person::Customer { name, .. } | Person::BankEmployee { name, .. } => name,
        }
    }

    pub fn kind(&self) -> PersonKind {
        match self {
            Person::Customer { .. } => PersonKind::Customer,
            Person::BankEmployee { .. } => PersonKind::BankEmployee,
        }
    }

    /// Reference recorded in a letter's approval list.
    pub fn approver(&self) -> Approver {
        Approver {
            person: self.id().clone(),
            kind: self.kind(),
            bank: self.bank_id().clone(),
        }
    }
}

/// A reference to a person who approved a letter's current rule set.
///
/// Carries the variant tag and bank affiliation alongside the id, both of
/// which are fixed for the lifetime of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approver {
    pub person: PersonId,
    pub kind: PersonKind,
    pub bank: BankId,
}

impl Approver {
    pub fn is_employee_of(&self, bank: &BankId) -> bool {
        self.kind == PersonKind::BankEmployee && &self.bank == bank
    }
}
