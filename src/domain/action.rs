use super::letter::{LetterId, ProductDetails, Rule};
use super::participant::PersonId;
use serde::{Deserialize, Serialize};

/// An incoming request addressed to one letter of credit.
///
/// Participants are referenced by id and resolved by the engine before the
/// matching transition runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    InitialApplication {
        letter_id: LetterId,
        applicant: PersonId,
        beneficiary: PersonId,
        rules: Vec<Rule>,
        product_details: ProductDetails,
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

impl Action {
    pub fn letter_id(&self) -> &LetterId {
        match self {
            Action::InitialApplication { letter_id, .. }
            | Action::Approve { letter_id, .. }
            | Action::Reject { letter_id, .. }
            | Action::SuggestChanges { letter_id, .. }
            | Action::ShipProduct { letter_id, .. }
            | Action::ReceiveProduct { letter_id, .. }
            | Action::ReadyForPayment { letter_id, .. }
            | Action::Close { letter_id, .. } => letter_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::InitialApplication { .. } => "InitialApplication",
            Action::Approve { .. } => "Approve",
            Action::Reject { .. } => "Reject",
            Action::SuggestChanges { .. } => "SuggestChanges",
            Action::ShipProduct { .. } => "ShipProduct",
            Action::ReceiveProduct { .. } => "ReceiveProduct",
            Action::ReadyForPayment { .. } => "ReadyForPayment",
            Action::Close { .. } => "Close",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_initial_application_deserialization() {
        let json = r#"{
            "action": "initial_application",
            "letter_id": "L1",
            "applicant": "alice",
            "beneficiary": "bob",
            "rules": [{"rule_id": "rule1", "rule_text": "Arrive in 10 days"}],
            "product_details": {"product_type": "Computer", "quantity": 100, "price_per_unit": "1230.50"}
        }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        match action {
            Action::InitialApplication {
                letter_id,
                rules,
                product_details,
                ..
            } => {
                assert_eq!(letter_id.as_str(), "L1");
                assert_eq!(rules.len(), 1);
                assert_eq!(product_details.price_per_unit, dec!(1230.50));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let json = r#"{"action": "refund", "letter_id": "L1"}"#;
        assert!(serde_json::from_str::<Action>(json).is_err());
    }
}
