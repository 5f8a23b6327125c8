//! One pure handler per action.
//!
//! Each handler takes the current record by reference and returns the next
//! record together with the event describing the change. The input record is
//! never modified, so a failed action leaves the caller's snapshot intact.

use super::approval::{ApprovalPolicy, bank_already_approved, person_already_approved};
use super::event::LocEvent;
use super::letter::{LetterId, LetterOfCredit, LocStatus, ProductDetails, Rule};
use super::participant::{Person, PersonKind};
use crate::error::{LocError, Result};

/// The outcome of a successful action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub letter: LetterOfCredit,
    pub event: LocEvent,
}

/// Creates a letter. The applicant is recorded as its first approver and the
/// banks are taken from the two customers' affiliations.
pub fn initial_application(
    existing: Option<&LetterOfCredit>,
    letter_id: LetterId,
    applicant: &Person,
    beneficiary: &Person,
    rules: Vec<Rule>,
    product_details: ProductDetails,
) -> Result<Transition> {
    if let Some(existing) = existing {
        existing.ensure_open()?;
        return Err(LocError::DuplicateId(letter_id));
    }
    for party in [applicant, beneficiary] {
        if party.kind() != PersonKind::Customer {
            return Err(LocError::InvalidParty(format!(
                "{} is not a customer and cannot be party to a letter",
                party.id()
            )));
        }
    }

    let letter = LetterOfCredit {
        letter_id: letter_id.clone(),
        applicant: applicant.id().clone(),
        beneficiary: beneficiary.id().clone(),
        issuing_bank: applicant.bank_id().clone(),
        exporting_bank: beneficiary.bank_id().clone(),
        rules,
        product_details,
        evidence: Vec::new(),
        approval: vec![applicant.approver()],
        status: LocStatus::AwaitingApproval,
        close_reason: None,
    };
    let event = LocEvent::InitialApplication {
        letter_id,
        applicant: applicant.id().clone(),
        beneficiary: beneficiary.id().clone(),
    };
    Ok(Transition { letter, event })
}

impl LetterOfCredit {
    pub fn approve(&self, approver: &Person, policy: &ApprovalPolicy) -> Result<Transition> {
        self.ensure_open()?;
        if person_already_approved(self, approver) {
            return Err(LocError::AlreadyApproved {
                person: approver.id().clone(),
            });
        }
        if bank_already_approved(self, approver) {
            return Err(LocError::BankAlreadyApproved {
                bank: approver.bank_id().clone(),
            });
        }

        let mut letter = self.clone();
        letter.approval.push(approver.approver());
        if letter.status == LocStatus::AwaitingApproval && policy.is_satisfied(&letter) {
            letter.advance(LocStatus::Approved)?;
        }
        let event = LocEvent::Approve {
            letter_id: letter.letter_id.clone(),
            approver: approver.id().clone(),
        };
        Ok(Transition { letter, event })
    }

    pub fn reject(&self, actor: &Person, close_reason: impl Into<String>) -> Result<Transition> {
        self.ensure_open()?;
        let close_reason = close_reason.into();

        let mut letter = self.clone();
        letter.advance(LocStatus::Rejected)?;
        letter.close_reason = Some(close_reason.clone());
        let event = LocEvent::Reject {
            letter_id: letter.letter_id.clone(),
            actor: actor.id().clone(),
            close_reason,
        };
        Ok(Transition { letter, event })
    }

    /// Replaces the rules and restarts approval with the suggester alone.
    /// Status is left as it was.
    pub fn suggest_changes(&self, suggester: &Person, rules: Vec<Rule>) -> Result<Transition> {
        self.ensure_open()?;
        if matches!(
            self.status,
            LocStatus::Shipped | LocStatus::Received | LocStatus::ReadyForPayment
        ) {
            return Err(LocError::AlreadyShipped(self.letter_id.clone()));
        }

        let mut letter = self.clone();
        letter.rules = rules.clone();
        letter.approval = vec![suggester.approver()];
        let event = LocEvent::SuggestChanges {
            letter_id: letter.letter_id.clone(),
            suggester: suggester.id().clone(),
            rules,
        };
        Ok(Transition { letter, event })
    }

    pub fn ship_product(&self, actor: &Person, evidence: impl Into<String>) -> Result<Transition> {
        self.ensure_open()?;
        match self.status {
            LocStatus::AwaitingApproval => {
                return Err(LocError::NotFullyApproved(self.letter_id.clone()));
            }
            LocStatus::Shipped | LocStatus::Received | LocStatus::ReadyForPayment => {
                return Err(LocError::AlreadyShipped(self.letter_id.clone()));
            }
            _ => {}
        }
        let evidence = evidence.into();

        let mut letter = self.clone();
        letter.evidence.push(evidence.clone());
        letter.advance(LocStatus::Shipped)?;
        let event = LocEvent::ShipProduct {
            letter_id: letter.letter_id.clone(),
            actor: actor.id().clone(),
            evidence,
        };
        Ok(Transition { letter, event })
    }

    pub fn receive_product(&self, actor: &Person) -> Result<Transition> {
        self.ensure_open()?;
        match self.status {
            LocStatus::Received | LocStatus::ReadyForPayment => {
                return Err(LocError::AlreadyReceived(self.letter_id.clone()));
            }
            LocStatus::Shipped => {}
            _ => return Err(LocError::NotYetShipped(self.letter_id.clone())),
        }

        let mut letter = self.clone();
        letter.advance(LocStatus::Received)?;
        let event = LocEvent::ReceiveProduct {
            letter_id: letter.letter_id.clone(),
            actor: actor.id().clone(),
        };
        Ok(Transition { letter, event })
    }

    pub fn ready_for_payment(&self, actor: &Person) -> Result<Transition> {
        self.ensure_open()?;
        match self.status {
            LocStatus::ReadyForPayment => {
                return Err(LocError::AlreadyReady(self.letter_id.clone()));
            }
            LocStatus::Received => {}
            _ => return Err(LocError::NotYetReceived(self.letter_id.clone())),
        }

        let mut letter = self.clone();
        letter.advance(LocStatus::ReadyForPayment)?;
        let event = LocEvent::ReadyForPayment {
            letter_id: letter.letter_id.clone(),
            actor: actor.id().clone(),
        };
        Ok(Transition { letter, event })
    }

    pub fn close(&self, actor: &Person, close_reason: impl Into<String>) -> Result<Transition> {
        self.ensure_open()?;
        if self.status != LocStatus::ReadyForPayment {
            return Err(LocError::NotReadyToClose(self.letter_id.clone()));
        }
        let close_reason = close_reason.into();

        let mut letter = self.clone();
        letter.advance(LocStatus::Closed)?;
        letter.close_reason = Some(close_reason.clone());
        let event = LocEvent::Close {
            letter_id: letter.letter_id.clone(),
            actor: actor.id().clone(),
            close_reason,
        };
        Ok(Transition { letter, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::approval::is_fully_approved;
    use rust_decimal_macros::dec;

    fn alice() -> Person {
        Person::customer("alice", "Alice", "VIB", "QuickFix IT")
    }

    fn bob() -> Person {
        Person::customer("bob", "Bob", "SEA", "Conga Computers")
    }

    fn matias() -> Person {
        Person::employee("matias", "Matías", "VIB")
    }

    fn ella() -> Person {
        Person::employee("ella", "Ella", "SEA")
    }

    fn open_letter() -> LetterOfCredit {
        initial_application(
            None,
            LetterId::new("L1"),
            &alice(),
            &bob(),
            vec![Rule::new("rule1", "The product must arrive in 10 days")],
            ProductDetails {
                product_type: "Computer".to_string(),
                quantity: 100,
                price_per_unit: dec!(1230),
            },
        )
        .unwrap()
        .letter
    }

    fn with_status(status: LocStatus) -> LetterOfCredit {
        let mut letter = open_letter();
        letter.status = status;
        letter
    }

    fn approved_letter() -> LetterOfCredit {
        let policy = ApprovalPolicy::STANDARD;
        let letter = open_letter();
        let letter = letter.approve(&matias(), &policy).unwrap().letter;
        let letter = letter.approve(&ella(), &policy).unwrap().letter;
        letter.approve(&bob(), &policy).unwrap().letter
    }

    #[test]
    fn test_initial_application_records_applicant_as_first_approver() {
        let letter = open_letter();
        assert_eq!(letter.status, LocStatus::AwaitingApproval);
        assert_eq!(letter.approval, vec![alice().approver()]);
        assert_eq!(letter.issuing_bank.as_str(), "VIB");
        assert_eq!(letter.exporting_bank.as_str(), "SEA");
        assert!(letter.evidence.is_empty());
        assert!(letter.close_reason.is_none());
    }

    #[test]
    fn test_initial_application_rejects_existing_id() {
        let existing = open_letter();
        let result = initial_application(
            Some(&existing),
            LetterId::new("L1"),
            &alice(),
            &bob(),
            vec![],
            existing.product_details.clone(),
        );
        assert!(matches!(result, Err(LocError::DuplicateId(_))));
    }

    #[test]
    fn test_initial_application_requires_customers() {
        let existing = open_letter();
        let result = initial_application(
            None,
            LetterId::new("L2"),
            &matias(),
            &bob(),
            vec![],
            existing.product_details,
        );
        assert!(matches!(result, Err(LocError::InvalidParty(_))));
    }

    #[test]
    fn test_second_employee_of_same_bank_is_refused() {
        let policy = ApprovalPolicy::STANDARD;
        let letter = open_letter()
            .approve(&matias(), &policy)
            .unwrap()
            .letter;
        assert_eq!(letter.approval, vec![alice().approver(), matias().approver()]);
        assert_eq!(letter.status, LocStatus::AwaitingApproval);

        let colleague = Person::employee("jo", "Jo", "VIB");
        let result = letter.approve(&colleague, &policy);
        assert!(matches!(result, Err(LocError::BankAlreadyApproved { .. })));
    }

    #[test]
    fn test_customer_cannot_approve_twice() {
        let result = open_letter().approve(&alice(), &ApprovalPolicy::STANDARD);
        assert!(matches!(result, Err(LocError::AlreadyApproved { .. })));
    }

    #[test]
    fn test_fourth_approver_approves_the_letter() {
        let policy = ApprovalPolicy::STANDARD;
        let letter = open_letter();
        let letter = letter.approve(&matias(), &policy).unwrap().letter;
        let letter = letter.approve(&ella(), &policy).unwrap().letter;
        assert_eq!(letter.status, LocStatus::AwaitingApproval);
        assert!(!is_fully_approved(&letter));

        let transition = letter.approve(&bob(), &policy).unwrap();
        assert_eq!(transition.letter.status, LocStatus::Approved);
        assert_eq!(
            transition.letter.approval,
            vec![
                alice().approver(),
                matias().approver(),
                ella().approver(),
                bob().approver()
            ]
        );
        assert_eq!(
            transition.event,
            LocEvent::Approve {
                letter_id: LetterId::new("L1"),
                approver: bob().id().clone(),
            }
        );
    }

    #[test]
    fn test_late_approval_does_not_change_status() {
        let shipped = approved_letter().ship_product(&ella(), "doc1").unwrap().letter;
        let carol = Person::customer("carol", "Carol", "VIB", "Carol Co");
        let letter = shipped.approve(&carol, &ApprovalPolicy::STANDARD).unwrap().letter;
        assert_eq!(letter.status, LocStatus::Shipped);
        assert_eq!(letter.approval.len(), 5);
    }

    #[test]
    fn test_suggest_changes_restarts_approval() {
        let letter = approved_letter();
        let rules = vec![Rule::new("rule1", "The product must arrive in 15 days")];
        let transition = letter.suggest_changes(&bob(), rules.clone()).unwrap();
        assert_eq!(transition.letter.rules, rules);
        assert_eq!(transition.letter.approval, vec![bob().approver()]);
        assert_eq!(transition.letter.status, LocStatus::Approved);
    }

    #[test]
    fn test_suggest_changes_after_shipment_fails() {
        for status in [
            LocStatus::Shipped,
            LocStatus::Received,
            LocStatus::ReadyForPayment,
        ] {
            let result = with_status(status).suggest_changes(&bob(), vec![]);
            assert!(matches!(result, Err(LocError::AlreadyShipped(_))), "{status}");
        }
    }

    #[test]
    fn test_ship_product_flow() {
        let shipped = approved_letter().ship_product(&ella(), "doc1").unwrap().letter;
        assert_eq!(shipped.status, LocStatus::Shipped);
        assert_eq!(shipped.evidence, vec!["doc1".to_string()]);

        let again = shipped.ship_product(&ella(), "doc2");
        assert!(matches!(again, Err(LocError::AlreadyShipped(_))));
    }

    #[test]
    fn test_ship_before_approval_fails() {
        let result = open_letter().ship_product(&ella(), "doc1");
        assert!(matches!(result, Err(LocError::NotFullyApproved(_))));
    }

    #[test]
    fn test_evidence_is_appended() {
        let mut letter = approved_letter();
        letter.evidence = vec!["invoice".to_string()];
        let shipped = letter.ship_product(&ella(), "bill of lading").unwrap().letter;
        assert_eq!(
            shipped.evidence,
            vec!["invoice".to_string(), "bill of lading".to_string()]
        );
    }

    #[test]
    fn test_receive_product_guards() {
        let result = with_status(LocStatus::Approved).receive_product(&alice());
        assert!(matches!(result, Err(LocError::NotYetShipped(_))));

        let received = with_status(LocStatus::Shipped)
            .receive_product(&alice())
            .unwrap()
            .letter;
        assert_eq!(received.status, LocStatus::Received);

        let again = received.receive_product(&alice());
        assert!(matches!(again, Err(LocError::AlreadyReceived(_))));
    }

    #[test]
    fn test_ready_for_payment_guards() {
        let err = with_status(LocStatus::Shipped)
            .ready_for_payment(&matias())
            .unwrap_err();
        assert_eq!(err.to_string(), "Payment cannot be made until received");

        let ready = with_status(LocStatus::Received)
            .ready_for_payment(&matias())
            .unwrap()
            .letter;
        assert_eq!(ready.status, LocStatus::ReadyForPayment);

        let err = ready.ready_for_payment(&matias()).unwrap_err();
        assert!(matches!(err, LocError::AlreadyReady(_)));
        assert_eq!(err.to_string(), "Payment has already been made");
    }

    #[test]
    fn test_close_then_approve_fails() {
        let closed = with_status(LocStatus::ReadyForPayment)
            .close(&matias(), "paid")
            .unwrap()
            .letter;
        assert_eq!(closed.status, LocStatus::Closed);
        assert_eq!(closed.close_reason.as_deref(), Some("paid"));

        let result = closed.approve(&ella(), &ApprovalPolicy::STANDARD);
        assert!(matches!(result, Err(LocError::AlreadyClosed(_))));
    }

    #[test]
    fn test_close_before_payment_fails() {
        let result = with_status(LocStatus::Received).close(&matias(), "paid");
        assert!(matches!(result, Err(LocError::NotReadyToClose(_))));
    }

    #[test]
    fn test_reject_from_any_open_status() {
        for status in LocStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            let rejected = with_status(status).reject(&bob(), "terms").unwrap().letter;
            assert_eq!(rejected.status, LocStatus::Rejected);
            assert_eq!(rejected.close_reason.as_deref(), Some("terms"));
        }
    }

    #[test]
    fn test_terminal_records_refuse_every_action() {
        let policy = ApprovalPolicy::STANDARD;
        for status in [LocStatus::Closed, LocStatus::Rejected] {
            let letter = with_status(status);
            let before = letter.clone();
            let results = [
                initial_application(
                    Some(&letter),
                    letter.letter_id.clone(),
                    &alice(),
                    &bob(),
                    vec![],
                    letter.product_details.clone(),
                ),
                letter.approve(&matias(), &policy),
                letter.reject(&bob(), "late"),
                letter.suggest_changes(&bob(), vec![]),
                letter.ship_product(&ella(), "doc"),
                letter.receive_product(&alice()),
                letter.ready_for_payment(&matias()),
                letter.close(&matias(), "paid"),
            ];
            for result in results {
                assert!(matches!(result, Err(LocError::AlreadyClosed(_))), "{status}");
            }
            assert_eq!(letter, before);
        }
    }

    #[test]
    fn test_illegal_advance_is_refused() {
        let mut letter = with_status(LocStatus::AwaitingApproval);
        let result = letter.advance(LocStatus::Closed);
        assert!(matches!(result, Err(LocError::IllegalTransition { .. })));
        assert_eq!(letter.status, LocStatus::AwaitingApproval);
    }
}
