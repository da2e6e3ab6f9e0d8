use rust_decimal::Decimal;

use crate::catalog::{Field, Group};
use crate::data::{ApplicationData, Iteration};
use crate::money::{Money, MoneyError};

/// Gross monthly income of one job iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct JobIncomeInformation<'a> {
    pub index_in_jobs: usize,
    pub iteration: &'a Iteration,
    pub gross_monthly_income: Money,
}

/// Computes gross monthly income for every job with enough answers to do so.
///
/// Jobs without a complete pay description are left out. A job whose amounts
/// do not parse is left out as well, with a warning.
pub fn gross_monthly_incomes(data: &ApplicationData) -> Vec<JobIncomeInformation<'_>> {
    let Some(jobs) = data.subworkflow(Group::Jobs.name()) else {
        return Vec::new();
    };

    jobs.iter()
        .enumerate()
        .filter_map(|(index, iteration)| match job_monthly_income(iteration) {
            Ok(Some(income)) => Some(JobIncomeInformation {
                index_in_jobs: index,
                iteration,
                gross_monthly_income: income,
            }),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(job = index, error = %err, "skipping job with unreadable income");
                None
            }
        })
        .collect()
}

fn job_monthly_income(iteration: &Iteration) -> Result<Option<Money>, MoneyError> {
    let pages = &iteration.pages;
    if Field::PaidByTheHour.is_true(pages) {
        let (Some(wage), Some(hours)) = (
            Field::HourlyWage.first_value(pages),
            Field::HoursAWeek.first_value(pages),
        ) else {
            return Ok(None);
        };
        let wage = Money::parse(wage)?;
        let hours = Money::parse(hours)?.amount();
        return Ok(Some(wage.checked_mul(hours)?.checked_mul(Decimal::from(4))?));
    }

    let (Some(amount), Some(period)) = (
        Field::IncomePerPayPeriod.first_value(pages),
        Field::PayPeriod.first_value(pages),
    ) else {
        return Ok(None);
    };
    let Some(multiplier) = pay_period_multiplier(period) else {
        return Ok(None);
    };
    Ok(Some(Money::parse(amount)?.checked_mul(Decimal::from(multiplier))?))
}

fn pay_period_multiplier(period: &str) -> Option<i64> {
    match period {
        "EVERY_WEEK" => Some(4),
        "EVERY_TWO_WEEKS" | "TWICE_A_MONTH" => Some(2),
        "EVERY_MONTH" | "IT_VARIES" => Some(1),
        _ => None,
    }
}

/// Household income for the last 30 days.
///
/// The stated 30-day figure is used when it was answered; otherwise the
/// per-job gross monthly incomes are summed.
pub fn total_income(
    stated_last_thirty_days: Option<Money>,
    jobs: &[JobIncomeInformation<'_>],
) -> Result<Money, MoneyError> {
    match stated_last_thirty_days {
        Some(stated) => Ok(stated),
        None => Money::checked_sum(jobs.iter().map(|job| job.gross_monthly_income)),
    }
}
