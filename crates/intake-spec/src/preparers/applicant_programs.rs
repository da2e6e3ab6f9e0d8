use crate::catalog::Field;
use crate::data::ApplicationData;
use crate::field::{Document, DocumentField, Recipient};
use crate::scope::IterationScopeTracker;

use super::DocumentFieldPreparer;

/// One `Yes` field per program the applicant chose.
///
/// Choosing the MFIP follow-up implies cash assistance.
pub struct ApplicantProgramsPreparer;

impl DocumentFieldPreparer for ApplicantProgramsPreparer {
    fn name(&self) -> &'static str {
        "applicant_programs"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        _document: Document,
        _recipient: Recipient,
        _scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        let mut programs: Vec<&str> = Field::ApplicantPrograms
            .values(&data.pages)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect();

        let is_mfip = Field::ApplyForMfip
            .values(&data.pages)
            .is_some_and(|values| values.iter().any(|value| value == "true"));
        if is_mfip && !programs.contains(&"CASH") {
            programs.push("CASH");
        }

        programs
            .into_iter()
            .map(|program| DocumentField::single("applicantPrograms", program, "Yes"))
            .collect()
    }
}
