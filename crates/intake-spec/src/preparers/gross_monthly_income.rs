use crate::catalog::is_applicants_job;
use crate::config::PageGroupConfig;
use crate::data::ApplicationData;
use crate::field::{Document, DocumentField, Recipient};
use crate::income::{JobIncomeInformation, gross_monthly_incomes};
use crate::scope::IterationScopeTracker;

use super::DocumentFieldPreparer;

const GROUP: &str = "employee";
const NAME: &str = "grossMonthlyIncome";

/// Emits each job's gross monthly income twice when the job belongs to a scope:
/// once at its position among all jobs, once at its position within the scope.
pub struct GrossMonthlyIncomePreparer {
    jobs: PageGroupConfig,
}

impl GrossMonthlyIncomePreparer {
    pub fn new(jobs: PageGroupConfig) -> Self {
        Self { jobs }
    }
}

impl DocumentFieldPreparer for GrossMonthlyIncomePreparer {
    fn name(&self) -> &'static str {
        "gross_monthly_income"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        document: Document,
        _recipient: Recipient,
        scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        let jobs = gross_monthly_incomes(data);
        let jobs: Vec<&JobIncomeInformation<'_>> = match document {
            Document::CertainPops => jobs
                .iter()
                .filter(|job| is_applicants_job(&job.iteration.pages))
                .collect(),
            Document::Caf | Document::Ccap => jobs.iter().collect(),
        };

        let mut fields = Vec::new();
        for job in jobs {
            let value = job.gross_monthly_income.to_string();
            fields.push(DocumentField::single(GROUP, NAME, value.clone()).at_iteration(job.index_in_jobs));

            if let Some(info) = scopes.scope_info(&self.jobs, job.iteration) {
                fields.push(
                    DocumentField::single(format!("{}_{GROUP}", info.scope), NAME, value)
                        .at_iteration(info.index),
                );
            }
        }
        fields
    }
}
