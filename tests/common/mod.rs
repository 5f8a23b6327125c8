#![allow(dead_code)]

use std::fs::File;
use std::io::{Error, Write};
use std::path::{Path, PathBuf};

pub const PARTICIPANTS: &str = "tests/fixtures/participants.json";

pub fn initial_application(letter_id: &str) -> String {
    format!(
        r#"{{"action": "initial_application", "letter_id": "{letter_id}", "applicant": "alice", "beneficiary": "bob", "rules": [{{"rule_id": "rule1", "rule_text": "The product must arrive in 10 days"}}], "product_details": {{"product_type": "Computer", "quantity": 100, "price_per_unit": "1230"}}}}"#
    )
}

pub fn approve(letter_id: &str, approver: &str) -> String {
    format!(r#"{{"action": "approve", "letter_id": "{letter_id}", "approver": "{approver}"}}"#)
}

pub fn ship(letter_id: &str, evidence: &str) -> String {
    format!(
        r#"{{"action": "ship_product", "letter_id": "{letter_id}", "actor": "bob", "evidence": "{evidence}"}}"#
    )
}

pub fn write_actions(path: &Path, lines: &[String]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    file.flush()
}

/// Writes `letters` independent letters, each taken through full approval and shipment.
pub fn generate_actions(path: &Path, letters: usize) -> Result<(), Error> {
    let mut lines = Vec::with_capacity(letters * 5);
    for i in 1..=letters {
        let id = format!("L{}", i);
        lines.push(initial_application(&id));
        for approver in ["matias", "ella", "bob"] {
            lines.push(approve(&id, approver));
        }
        lines.push(ship(&id, &format!("doc-{}", i)));
    }
    write_actions(path, &lines)
}

pub fn participants() -> PathBuf {
    PathBuf::from(PARTICIPANTS)
}
