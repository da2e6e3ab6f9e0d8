use crate::catalog::Field;
use crate::data::ApplicationData;
use crate::field::{Document, DocumentField, Recipient};
use crate::scope::IterationScopeTracker;

use super::{DocumentFieldPreparer, expand_options};

const GROUP: &str = "basicCriteria";

const BASE_CRITERIA: [&str; 6] = [
    "SIXTY_FIVE_OR_OLDER",
    "BLIND",
    "HAVE_DISABILITY_SSA",
    "HAVE_DISABILITY_SMRT",
    "MEDICAL_ASSISTANCE",
    "SSI_OR_RSDI",
];

const DETERMINED_DISABILITY: [&str; 3] = ["SSI_OR_RSDI", "HAVE_DISABILITY_SSA", "HAVE_DISABILITY_SMRT"];

/// Health care eligibility criteria, plus the blindness/disability summary.
pub struct BasicCriteriaPreparer;

impl DocumentFieldPreparer for BasicCriteriaPreparer {
    fn name(&self) -> &'static str {
        "basic_criteria"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        _document: Document,
        _recipient: Recipient,
        _scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        let Some(selected) = Field::BasicCriteria.values(&data.pages) else {
            return Vec::new();
        };
        let is_selected = |code: &str| selected.iter().any(|value| value == code);

        let mut fields = expand_options(GROUP, &BASE_CRITERIA, selected);
        if is_selected("HELP_WITH_MEDICARE") {
            fields.push(DocumentField::enumerated(GROUP, "HELP_WITH_MEDICARE", "true"));
        }

        let disability_determined = DETERMINED_DISABILITY.iter().any(|code| is_selected(*code));
        let blind_or_disabled = is_selected("BLIND")
            || disability_determined
            || is_selected("MEDICAL_ASSISTANCE")
            || Field::HasDisability.is_true(&data.pages);
        if blind_or_disabled {
            fields.push(DocumentField::enumerated(GROUP, "blindOrHasDisability", "true"));
            fields.push(DocumentField::enumerated(
                GROUP,
                "disabilityDetermination",
                disability_determined.to_string(),
            ));
        }
        fields
    }
}
