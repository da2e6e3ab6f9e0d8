use std::collections::BTreeMap;

use crate::catalog::{Field, full_name};
use crate::config::CountyInstructions;
use crate::data::ApplicationData;
use crate::field::{Document, DocumentField, Recipient};
use crate::scope::IterationScopeTracker;

use super::DocumentFieldPreparer;

const GROUP: &str = "coverPage";
const FALLBACK_COUNTY: &str = "Other";

/// Cover sheet fields: the combined program list, the applicant's name, and
/// county instructions worded for whoever receives the document.
pub struct CoverPagePreparer {
    county_instructions: BTreeMap<String, CountyInstructions>,
}

impl CoverPagePreparer {
    pub fn new(county_instructions: BTreeMap<String, CountyInstructions>) -> Self {
        Self { county_instructions }
    }

    /// Instructions for the applicant's county, falling back to `Other`.
    fn instructions_for(&self, county: Option<&str>) -> Option<&CountyInstructions> {
        let lookup = |name: &str| {
            self.county_instructions
                .iter()
                .find(|(county, _)| county.eq_ignore_ascii_case(name.trim()))
                .map(|(_, instructions)| instructions)
        };
        county.and_then(lookup).or_else(|| lookup(FALLBACK_COUNTY))
    }
}

impl DocumentFieldPreparer for CoverPagePreparer {
    fn name(&self) -> &'static str {
        "cover_page"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        _document: Document,
        recipient: Recipient,
        _scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        let pages = &data.pages;
        let mut fields = Vec::new();

        if let Some(programs) = Field::ApplicantPrograms.values(pages)
            && !programs.is_empty()
        {
            fields.push(DocumentField::single(GROUP, "programs", programs.join(", ")));
        }

        let name = full_name(pages);
        if !name.is_empty() {
            fields.push(DocumentField::single(GROUP, "fullName", name));
        }

        match self.instructions_for(Field::IdentifyCounty.first_value(pages)) {
            Some(instructions) => fields.push(DocumentField::single(
                GROUP,
                "countyInstructions",
                instructions.for_recipient(recipient),
            )),
            None => tracing::debug!(%recipient, "no county instructions configured"),
        }

        fields
    }
}
