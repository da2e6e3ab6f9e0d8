//! Derivation units that turn answers into flat document fields.
//!
//! Each preparer reads the application data and may register iteration
//! indices with the shared [`IterationScopeTracker`]. The pipeline runs every
//! registered preparer with one fresh tracker and concatenates their output in
//! registration order.

mod applicant_programs;
mod basic_criteria;
mod cover_page;
mod derived_value;
mod expedited_eligibility;
mod gross_monthly_income;
mod has_cost_for_childcare;
mod living_situation;
mod self_employment;
mod unearned_income;

pub use applicant_programs::ApplicantProgramsPreparer;
pub use basic_criteria::BasicCriteriaPreparer;
pub use cover_page::CoverPagePreparer;
pub use derived_value::DerivedValuePreparer;
pub use expedited_eligibility::ExpeditedEligibilityPreparer;
pub use gross_monthly_income::GrossMonthlyIncomePreparer;
pub use has_cost_for_childcare::HasCostForChildcarePreparer;
pub use living_situation::LivingSituationPreparer;
pub use self_employment::SelfEmploymentPreparer;
pub use unearned_income::UnearnedIncomeCcapPreparer;

use crate::config::PagesConfig;
use crate::data::ApplicationData;
use crate::field::{Document, DocumentField, DocumentFieldType, Recipient};
use crate::scope::IterationScopeTracker;

pub trait DocumentFieldPreparer {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn prepare(
        &self,
        data: &ApplicationData,
        document: Document,
        recipient: Recipient,
        scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField>;
}

/// Ordered set of preparers producing one flat field list.
#[derive(Default)]
pub struct DocumentFieldPipeline {
    preparers: Vec<Box<dyn DocumentFieldPreparer>>,
}

impl DocumentFieldPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in preparer, wired to the group, derived-value and county
    /// instruction configuration.
    pub fn standard(config: &PagesConfig) -> Self {
        let jobs = config.page_group("jobs").cloned().unwrap_or_default();
        Self::new()
            .with(LivingSituationPreparer)
            .with(ApplicantProgramsPreparer)
            .with(GrossMonthlyIncomePreparer::new(jobs))
            .with(SelfEmploymentPreparer)
            .with(UnearnedIncomeCcapPreparer)
            .with(BasicCriteriaPreparer)
            .with(DerivedValuePreparer::new(config.derived_values.clone()))
            .with(ExpeditedEligibilityPreparer)
            .with(HasCostForChildcarePreparer)
            .with(CoverPagePreparer::new(config.county_instructions.clone()))
    }

    pub fn with(mut self, preparer: impl DocumentFieldPreparer + 'static) -> Self {
        self.preparers.push(Box::new(preparer));
        self
    }

    pub fn len(&self) -> usize {
        self.preparers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preparers.is_empty()
    }

    /// Runs every preparer against the current answers.
    ///
    /// A new scope tracker is created for each call so indices never leak
    /// between calls or applications.
    pub fn prepare_all_fields(
        &self,
        data: &ApplicationData,
        document: Document,
        recipient: Recipient,
    ) -> Vec<DocumentField> {
        let mut scopes = IterationScopeTracker::new();
        let mut fields = Vec::new();
        for preparer in &self.preparers {
            let prepared = preparer.prepare(data, document, recipient, &mut scopes);
            tracing::trace!(preparer = preparer.name(), count = prepared.len(), "prepared fields");
            fields.extend(prepared);
        }
        tracing::debug!(%document, %recipient, count = fields.len(), "prepared document fields");
        fields
    }
}

/// One boolean field per possible option, `true` for the selected ones.
pub(crate) fn expand_options(
    group_name: &str,
    options: &[&str],
    selected: &[String],
) -> Vec<DocumentField> {
    options
        .iter()
        .map(|option| {
            let chosen = selected.iter().any(|value| value == option);
            DocumentField::new(
                group_name,
                *option,
                vec![chosen.to_string()],
                DocumentFieldType::EnumeratedSingleValue,
            )
        })
        .collect()
}
