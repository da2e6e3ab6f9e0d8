use crate::catalog::{Field, Group, full_name, is_applicants_job};
use crate::data::ApplicationData;
use crate::field::{Document, DocumentField, Recipient};
use crate::scope::IterationScopeTracker;

use super::DocumentFieldPreparer;

const GROUP: &str = "employee";

/// Whether anyone (or, on the certain populations form, the applicant) is self-employed.
pub struct SelfEmploymentPreparer;

impl DocumentFieldPreparer for SelfEmploymentPreparer {
    fn name(&self) -> &'static str {
        "self_employment"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        document: Document,
        _recipient: Recipient,
        _scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        let Some(answers) = Group::Jobs.values(data, Field::IsSelfEmployment) else {
            return Vec::new();
        };

        match document {
            Document::CertainPops => applicant_fields(data),
            Document::Caf | Document::Ccap => {
                let self_employed = answers.iter().any(|answer| *answer == "true");
                let earnings_reference = if self_employed { "see question 9" } else { "" };
                vec![
                    DocumentField::single(GROUP, "selfEmployed", self_employed.to_string()),
                    DocumentField::single(GROUP, "selfEmployedGrossMonthlyEarnings", earnings_reference),
                ]
            }
        }
    }
}

fn applicant_fields(data: &ApplicationData) -> Vec<DocumentField> {
    let applicant_self_employed = data.subworkflow(Group::Jobs.name()).is_some_and(|jobs| {
        jobs.iter()
            .any(|job| is_applicants_job(&job.pages) && Field::IsSelfEmployment.is_true(&job.pages))
    });

    if applicant_self_employed {
        vec![
            DocumentField::single(GROUP, "selfEmployed", "true"),
            DocumentField::single(GROUP, "selfEmployedApplicantName", full_name(&data.pages)),
        ]
    } else {
        vec![DocumentField::single(GROUP, "selfEmployed", "false")]
    }
}
