use serde::{Deserialize, Serialize};

use crate::catalog::{Field, Group};
use crate::data::ApplicationData;
use crate::income::{gross_monthly_incomes, total_income};
use crate::money::{Money, MoneyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Eligibility {
    Eligible,
    NotEligible,
    Undetermined,
}

impl Eligibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Eligibility::Eligible => "ELIGIBLE",
            Eligibility::NotEligible => "NOT_ELIGIBLE",
            Eligibility::Undetermined => "UNDETERMINED",
        }
    }
}

/// Liquid assets at or below this amount can qualify.
pub fn asset_threshold() -> Money {
    Money::from_dollars(100)
}

/// Monthly income strictly below this amount can qualify.
pub fn income_threshold() -> Money {
    Money::from_dollars(150)
}

/// Standard utility deduction for the selected utility expenses.
pub fn standard_utility_deduction(selections: &[String]) -> Money {
    let selected = |code: &str| selections.iter().any(|selection| selection == code);
    if selected("HEATING") || selected("COOLING") {
        Money::from_dollars(490)
    } else if selected("ELECTRICITY") && selected("PHONE") {
        Money::from_dollars(192)
    } else if selected("ELECTRICITY") {
        Money::from_dollars(143)
    } else if selected("PHONE") {
        Money::from_dollars(49)
    } else {
        Money::ZERO
    }
}

/// Decides expedited food-support eligibility.
///
/// Rules run in strict order and the first decisive rule wins:
/// 1. missing migrant-worker status, missing utility selections, or pending
///    (all blank) job estimates: undetermined;
/// 2. not applying for the program: not eligible;
/// 3. assets at or below the threshold and income below the threshold;
/// 4. migrant or seasonal farm worker with assets at or below the threshold;
/// 5. assets plus income below housing costs plus the utility deduction.
///
/// Malformed money answers, and amounts too large to add up, are returned as
/// errors rather than guessed at.
pub fn decide(data: &ApplicationData) -> Result<Eligibility, MoneyError> {
    let pages = &data.pages;

    if !can_determine(data) {
        return Ok(Eligibility::Undetermined);
    }
    if !is_applying_for_snap(data) {
        return Ok(Eligibility::NotEligible);
    }

    let assets = Money::parse_or(Field::Assets.first_value(pages), Money::ZERO)?;
    let stated = match Field::Income.first_value(pages) {
        Some(text) if !text.trim().is_empty() => Some(Money::parse(text)?),
        _ => None,
    };
    let income = total_income(stated, &gross_monthly_incomes(data))?;
    tracing::debug!(%assets, %income, "expedited eligibility inputs");

    if assets <= asset_threshold() && income < income_threshold() {
        return Ok(Eligibility::Eligible);
    }

    if Field::MigrantWorker.is_true(pages) && assets <= asset_threshold() {
        return Ok(Eligibility::Eligible);
    }

    let selections = Field::UtilityExpensesSelections.values(pages).unwrap_or_default();
    let deduction = standard_utility_deduction(selections);
    let housing_costs = Money::parse_or(Field::HousingCosts.first_value(pages), Money::ZERO)?;
    if assets.checked_add(income)? < housing_costs.checked_add(deduction)? {
        return Ok(Eligibility::Eligible);
    }

    Ok(Eligibility::NotEligible)
}

fn can_determine(data: &ApplicationData) -> bool {
    let pages = &data.pages;
    if Field::MigrantWorker.first_value(pages).is_none()
        || Field::UtilityExpensesSelections.first_value(pages).is_none()
    {
        return false;
    }

    match Group::Jobs.values(data, Field::LastThirtyDaysJobIncome) {
        Some(estimates) if !estimates.is_empty() => {
            !estimates.iter().all(|estimate| estimate.trim().is_empty())
        }
        _ => true,
    }
}

/// Applicant chose the program, or a household member did and the household shares meals.
pub fn is_applying_for_snap(data: &ApplicationData) -> bool {
    let applicant = Field::ApplicantPrograms
        .values(&data.pages)
        .is_some_and(|programs| programs.iter().any(|program| program == "SNAP"));
    let household_member = Group::Household
        .values(data, Field::HouseholdPrograms)
        .is_some_and(|programs| programs.contains(&"SNAP"));
    let preparing_meals_together = Field::PreparingMealsTogether.is_true(&data.pages);

    applicant || (household_member && preparing_meals_together)
}
