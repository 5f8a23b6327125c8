//! Derived views over a letter's `approval` list.
//!
//! Nothing here is stored: every predicate recomputes from the list so a
//! reset by `SuggestChanges` can never leave a stale count behind.

use super::letter::LetterOfCredit;
use super::participant::{BankId, Person, PersonId, PersonKind};
use serde::{Deserialize, Serialize};

/// A party whose approval a policy requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredApprover {
    /// A specific person, identified by id.
    Person(PersonId),
    /// Any one employee of the given bank.
    EmployeeOf(BankId),
}

/// Names the parties that must approve before a letter counts as approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalPolicy {
    pub applicant: bool,
    pub beneficiary: bool,
    pub issuing_bank: bool,
    pub exporting_bank: bool,
}

impl ApprovalPolicy {
    /// Applicant, beneficiary, and one employee of each of the two banks.
    pub const STANDARD: Self = Self {
        applicant: true,
        beneficiary: true,
        issuing_bank: true,
        exporting_bank: true,
    };

    pub fn required_approvers(&self, loc: &LetterOfCredit) -> Vec<RequiredApprover> {
        let mut required = Vec::with_capacity(4);
        if self.applicant {
            required.push(RequiredApprover::Person(loc.applicant.clone()));
        }
        if self.beneficiary {
            required.push(RequiredApprover::Person(loc.beneficiary.clone()));
        }
        if self.issuing_bank {
            required.push(RequiredApprover::EmployeeOf(loc.issuing_bank.clone()));
        }
        if self.exporting_bank {
            required.push(RequiredApprover::EmployeeOf(loc.exporting_bank.clone()));
        }
        required
    }

    pub fn is_satisfied(&self, loc: &LetterOfCredit) -> bool {
        self.required_approvers(loc)
            .iter()
            .all(|required| match required {
                RequiredApprover::Person(id) => loc.approval.iter().any(|a| &a.person == id),
                RequiredApprover::EmployeeOf(bank) => {
                    loc.approval.iter().any(|a| a.is_employee_of(bank))
                }
            })
    }
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Whether `loc` carries every approval the standard policy requires.
pub fn is_fully_approved(loc: &LetterOfCredit) -> bool {
    ApprovalPolicy::STANDARD.is_satisfied(loc)
}

pub fn person_already_approved(loc: &LetterOfCredit, person: &Person) -> bool {
    loc.approval.iter().any(|a| &a.person == person.id())
}

/// Only employees are deduplicated by bank; customers never are.
pub fn bank_already_approved(loc: &LetterOfCredit, person: &Person) -> bool {
    person.kind() == PersonKind::BankEmployee
        && loc.approval.iter().any(|a| a.is_employee_of(person.bank_id()))
}
