use crate::catalog::Field;
use crate::data::{ApplicationData, PagesData};
use crate::field::{Document, DocumentField, Recipient};
use crate::scope::IterationScopeTracker;

use super::DocumentFieldPreparer;

const GROUP: &str = "livingSituation";

const TEMPORARILY_WITH_FRIENDS_OR_FAMILY_OPTIONS: [&str; 2] = [
    "TEMPORARILY_WITH_FRIENDS_OR_FAMILY_DUE_TO_ECONOMIC_HARDSHIP",
    "TEMPORARILY_WITH_FRIENDS_OR_FAMILY_OTHER_REASONS",
];

/// Collapses the living situation answer into one canonical code.
pub struct LivingSituationPreparer;

impl DocumentFieldPreparer for LivingSituationPreparer {
    fn name(&self) -> &'static str {
        "living_situation"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        _document: Document,
        _recipient: Recipient,
        _scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        derive(&data.pages)
    }
}

fn derive(pages: &PagesData) -> Vec<DocumentField> {
    // Page never reached.
    if !pages.contains_page(Field::LivingSituation.page_name()) {
        return Vec::new();
    }

    let Some(situation) = Field::LivingSituation.first_value(pages) else {
        return vec![derived("UNKNOWN")];
    };

    if TEMPORARILY_WITH_FRIENDS_OR_FAMILY_OPTIONS.contains(&situation) {
        return vec![derived("TEMPORARILY_WITH_FRIENDS_OR_FAMILY")];
    }

    if situation == "LIVING_IN_A_PLACE_NOT_MEANT_FOR_HOUSING" {
        let county = Field::IdentifyCounty.first_value(pages).unwrap_or_default();
        return vec![derived(situation), DocumentField::single(GROUP, "county", county)];
    }

    vec![derived(situation)]
}

fn derived(value: &str) -> DocumentField {
    DocumentField::enumerated(GROUP, "derivedLivingSituation", value)
}
