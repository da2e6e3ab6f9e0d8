use crate::catalog::Field;
use crate::data::ApplicationData;
use crate::field::{Document, DocumentField, Recipient};
use crate::scope::IterationScopeTracker;

use super::{DocumentFieldPreparer, expand_options};

const UNEARNED_INCOME_CCAP_OPTIONS: [&str; 7] = [
    "BENEFITS",
    "INSURANCE_PAYMENTS",
    "CONTRACT_FOR_DEED",
    "TRUST_MONEY",
    "HEALTH_CARE_REIMBURSEMENT",
    "INTEREST_DIVIDENDS",
    "OTHER_SOURCES",
];

/// Child care unearned income sources as one boolean per source.
pub struct UnearnedIncomeCcapPreparer;

impl DocumentFieldPreparer for UnearnedIncomeCcapPreparer {
    fn name(&self) -> &'static str {
        "unearned_income_ccap"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        _document: Document,
        _recipient: Recipient,
        _scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        match Field::UnearnedIncomeCcap.values(&data.pages) {
            Some(selected) => expand_options("unearnedIncomeCcap", &UNEARNED_INCOME_CCAP_OPTIONS, selected),
            None => Vec::new(),
        }
    }
}
