use super::participant::{Approver, BankId, PersonId};
use crate::error::{LocError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterId(String);

impl LetterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a letter of credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocStatus {
    AwaitingApproval,
    Approved,
    Shipped,
    Received,
    ReadyForPayment,
    Closed,
    Rejected,
}

impl LocStatus {
    pub const ALL: [LocStatus; 7] = [
        LocStatus::AwaitingApproval,
        LocStatus::Approved,
        LocStatus::Shipped,
        LocStatus::Received,
        LocStatus::ReadyForPayment,
        LocStatus::Closed,
        LocStatus::Rejected,
    ];

    /// Statuses reachable from `self` in a single step.
    pub fn successors(&self) -> &'static [LocStatus] {
        match self {
            LocStatus::AwaitingApproval => &[LocStatus::Approved, LocStatus::Rejected],
            LocStatus::Approved => &[LocStatus::Shipped, LocStatus::Rejected],
            LocStatus::Shipped => &[LocStatus::Received, LocStatus::Rejected],
            LocStatus::Received => &[LocStatus::ReadyForPayment, LocStatus::Rejected],
            LocStatus::ReadyForPayment => &[LocStatus::Closed, LocStatus::Rejected],
            LocStatus::Closed | LocStatus::Rejected => &[],
        }
    }

    pub fn can_transition_to(&self, next: LocStatus) -> bool {
        self.successors().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LocStatus::Closed | LocStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocStatus::AwaitingApproval => "AWAITING_APPROVAL",
            LocStatus::Approved => "APPROVED",
            LocStatus::Shipped => "SHIPPED",
            LocStatus::Received => "RECEIVED",
            LocStatus::ReadyForPayment => "READY_FOR_PAYMENT",
            LocStatus::Closed => "CLOSED",
            LocStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for LocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single contract term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub rule_id: String,
    pub rule_text: String,
}

impl Rule {
    pub fn new(rule_id: impl Into<String>, rule_text: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_text: rule_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub product_type: String,
    pub quantity: u32,
    pub price_per_unit: Decimal,
}

/// The central record of the workflow.
///
/// Parties and banks are held as identifiers only. `product_details` and the
/// bank references are fixed at creation, `evidence` only ever grows, and
/// `approval` lists the approvers of the current `rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterOfCredit {
    pub letter_id: LetterId,
    pub applicant: PersonId,
    pub beneficiary: PersonId,
    pub issuing_bank: BankId,
    pub exporting_bank: BankId,
    pub rules: Vec<Rule>,
    pub product_details: ProductDetails,
    pub evidence: Vec<String>,
    pub approval: Vec<Approver>,
    pub status: LocStatus,
    pub close_reason: Option<String>,
}

impl LetterOfCredit {
    /// Fails with `AlreadyClosed` when the letter is closed or rejected.
    pub fn ensure_open(&self) -> Result<()> {
        if self.status.is_terminal() {
            return Err(LocError::AlreadyClosed(self.letter_id.clone()));
        }
        Ok(())
    }

    /// Moves to `next` along the transition graph.
    pub(crate) fn advance(&mut self, next: LocStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(LocError::IllegalTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
