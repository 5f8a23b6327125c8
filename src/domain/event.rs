use super::letter::{LetterId, Rule};
use super::participant::PersonId;
use serde::{Deserialize, Serialize};

/// Emitted alongside every successful transition, for audit and
/// notification consumers. The engine never reads these back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LocEvent {
    InitialApplication {
        letter_id: LetterId,
        applicant: PersonId,
        beneficiary: PersonId,
    },
    Approve {
        letter_id: LetterId,
        approver: PersonId,
    },
    Reject {
        letter_id: LetterId,
        actor: PersonId,
        close_reason: String,
    },
    SuggestChanges {
        letter_id: LetterId,
        suggester: PersonId,
        rules: Vec<Rule>,
    },
    ShipProduct {
        letter_id: LetterId,
        actor: PersonId,
        evidence: String,
    },
    ReceiveProduct {
        letter_id: LetterId,
        actor: PersonId,
    },
    ReadyForPayment {
        letter_id: LetterId,
        actor: PersonId,
    },
    Close {
        letter_id: LetterId,
        actor: PersonId,
        close_reason: String,
    },
}

impl LocEvent {
    pub fn letter_id(&self) -> &LetterId {
        match self {
            LocEvent::InitialApplication { letter_id, .. }
            | LocEvent::Approve { letter_id, .. }
            | LocEvent::Reject { letter_id, .. }
            | LocEvent::SuggestChanges { letter_id, .. }
            | LocEvent::ShipProduct { letter_id, .. }
            | LocEvent::ReceiveProduct { letter_id, .. }
            | LocEvent::ReadyForPayment { letter_id, .. }
            | LocEvent::Close { letter_id, .. } => letter_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocEvent::InitialApplication { .. } => "InitialApplicationEvent",
            LocEvent::Approve { .. } => "ApproveEvent",
            LocEvent::Reject { .. } => "RejectEvent",
            LocEvent::SuggestChanges { .. } => "SuggestChangesEvent",
            LocEvent::ShipProduct { .. } => "ShipProductEvent",
            LocEvent::ReceiveProduct { .. } => "ReceiveProductEvent",
            LocEvent::ReadyForPayment { .. } => "ReadyForPaymentEvent",
            LocEvent::Close { .. } => "CloseEvent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = LocEvent::Approve {
            letter_id: LetterId::new("L1"),
            approver: PersonId::new("matias"),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"approve","letter_id":"L1","approver":"matias"}"#);
        assert_eq!(event.name(), "ApproveEvent");
        assert_eq!(event.letter_id().as_str(), "L1");
    }
}
