use crate::domain::letter::{LetterOfCredit, LocStatus};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct LetterRow<'a> {
    letter_id: &'a str,
    status: LocStatus,
    applicant: &'a str,
    beneficiary: &'a str,
    issuing_bank: &'a str,
    exporting_bank: &'a str,
    approvals: String,
    evidence: String,
    close_reason: Option<&'a str>,
}

impl<'a> From<&'a LetterOfCredit> for LetterRow<'a> {
    fn from(letter: &'a LetterOfCredit) -> Self {
        Self {
            letter_id: letter.letter_id.as_str(),
            status: letter.status,
            applicant: letter.applicant.as_str(),
            beneficiary: letter.beneficiary.as_str(),
            issuing_bank: letter.issuing_bank.as_str(),
            exporting_bank: letter.exporting_bank.as_str(),
            approvals: letter
                .approval
                .iter()
                .map(|a| a.person.as_str())
                .collect::<Vec<_>>()
                .join(";"),
            evidence: letter.evidence.join(";"),
            close_reason: letter.close_reason.as_deref(),
        }
    }
}

/// Writes the final state of letters as CSV, one row per letter.
///
/// List fields are joined with `;`.
pub struct LetterWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LetterWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_letters(&mut self, letters: Vec<LetterOfCredit>) -> Result<()> {
        for letter in &letters {
            self.writer.serialize(LetterRow::from(letter))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
