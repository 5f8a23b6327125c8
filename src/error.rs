use crate::domain::letter::{LetterId, LocStatus};
use crate::domain::participant::{BankId, PersonId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocError>;

#[derive(Error, Debug)]
pub enum LocError {
    #[error("Letter of credit {0} is already closed")]
    AlreadyClosed(LetterId),
    #[error("Letter of credit {0} already exists")]
    DuplicateId(LetterId),
    #[error("This person has already approved")]
    AlreadyApproved { person: PersonId },
    #[error("Your bank has already approved")]
    BankAlreadyApproved { bank: BankId },
    #[error("The product has already been shipped")]
    AlreadyShipped(LetterId),
    #[error("Letter of credit {0} has not been fully approved")]
    NotFullyApproved(LetterId),
    #[error("The product has not been shipped yet")]
    NotYetShipped(LetterId),
    #[error("The product has already been received")]
    AlreadyReceived(LetterId),
    #[error("Payment cannot be made until received")]
    NotYetReceived(LetterId),
    #[error("Payment has already been made")]
    AlreadyReady(LetterId),
    #[error("Letter of credit {0} is not ready to be closed")]
    NotReadyToClose(LetterId),
    #[error("Illegal status transition from {from} to {to}")]
    IllegalTransition { from: LocStatus, to: LocStatus },
    #[error("Invalid party: {0}")]
    InvalidParty(String),
    #[error("Letter of credit {0} not found")]
    NotFound(LetterId),
    #[error("Unknown participant: {0}")]
    UnknownParticipant(PersonId),
    #[error("Unknown bank: {0}")]
    UnknownBank(BankId),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl LocError {
    /// Stable, machine-checkable kind of the failure.
    pub fn code(&self) -> &'static str {
        match self {
            LocError::AlreadyClosed(_) => "ALREADY_CLOSED",
            LocError::DuplicateId(_) => "DUPLICATE_ID",
            LocError::AlreadyApproved { .. } => "ALREADY_APPROVED",
            LocError::BankAlreadyApproved { .. } => "BANK_ALREADY_APPROVED",
            LocError::AlreadyShipped(_) => "ALREADY_SHIPPED",
            LocError::NotFullyApproved(_) => "NOT_FULLY_APPROVED",
            LocError::NotYetShipped(_) => "NOT_YET_SHIPPED",
            LocError::AlreadyReceived(_) => "ALREADY_RECEIVED",
            LocError::NotYetReceived(_) => "NOT_YET_RECEIVED",
            LocError::AlreadyReady(_) => "ALREADY_READY",
            LocError::NotReadyToClose(_) => "NOT_READY_TO_CLOSE",
            LocError::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
            LocError::InvalidParty(_) => "INVALID_PARTY",
            LocError::NotFound(_) => "NOT_FOUND",
            LocError::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
            LocError::UnknownBank(_) => "UNKNOWN_BANK",
            LocError::CsvError(_) => "CSV_ERROR",
            LocError::JsonError(_) => "JSON_ERROR",
            LocError::IoError(_) => "IO_ERROR",
            LocError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// True for failures of a lifecycle rule. These are final for the action
    /// that produced them; only storage and I/O faults are worth retrying.
    pub fn is_domain_rule(&self) -> bool {
        !matches!(
            self,
            LocError::CsvError(_)
                | LocError::JsonError(_)
                | LocError::IoError(_)
                | LocError::InternalError(_)
        )
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for LocError {
    fn from(e: rocksdb::Error) -> Self {
        LocError::InternalError(Box::new(e))
    }
}
