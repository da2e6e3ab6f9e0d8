use crate::data::ApplicationData;
use crate::eligibility::decide;
use crate::field::{Document, DocumentField, Recipient};
use crate::scope::IterationScopeTracker;

use super::DocumentFieldPreparer;

/// Reports the expedited food-support decision as a field.
pub struct ExpeditedEligibilityPreparer;

impl DocumentFieldPreparer for ExpeditedEligibilityPreparer {
    fn name(&self) -> &'static str {
        "expedited_eligibility"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        _document: Document,
        _recipient: Recipient,
        _scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        match decide(data) {
            Ok(eligibility) => vec![DocumentField::enumerated(
                "snapExpeditedEligibility",
                "snapExpeditedEligibility",
                eligibility.as_str(),
            )],
            Err(err) => {
                tracing::warn!(error = %err, "skipping expedited eligibility field");
                Vec::new()
            }
        }
    }
}
