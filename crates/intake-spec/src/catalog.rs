//! Names of the pages and inputs the derivations read.

use crate::data::{ApplicationData, PagesData};

/// A known `(page, input)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ApplicantPrograms,
    ApplyForMfip,
    HouseholdPrograms,
    PreparingMealsTogether,
    MigrantWorker,
    UtilityExpensesSelections,
    Assets,
    Income,
    HousingCosts,
    LastThirtyDaysJobIncome,
    WhoseJobIsIt,
    IsSelfEmployment,
    PaidByTheHour,
    HourlyWage,
    HoursAWeek,
    PayPeriod,
    IncomePerPayPeriod,
    LivingSituation,
    IdentifyCounty,
    FirstName,
    LastName,
    UnearnedIncomeCcap,
    BasicCriteria,
    HasDisability,
    GoingToSchool,
    LookingForJob,
    WhoIsGoingToSchool,
}

impl Field {
    pub fn page_name(&self) -> &'static str {
        self.location().0
    }

    pub fn input_name(&self) -> &'static str {
        self.location().1
    }

    fn location(&self) -> (&'static str, &'static str) {
        match self {
            Field::ApplicantPrograms => ("choosePrograms", "programs"),
            Field::ApplyForMfip => ("applyForMFIP", "applyForMFIP"),
            Field::HouseholdPrograms => ("householdMemberInfo", "programs"),
            Field::PreparingMealsTogether => ("preparingMealsTogether", "isPreparingMealsTogether"),
            Field::MigrantWorker => ("migrantFarmWorker", "migrantOrSeasonalFarmWorker"),
            Field::UtilityExpensesSelections => ("utilityPayments", "payForUtilities"),
            Field::Assets => ("liquidAssets", "liquidAssets"),
            Field::Income => ("thirtyDayIncome", "moneyMadeLast30Days"),
            Field::HousingCosts => ("homeExpensesAmount", "homeExpensesAmount"),
            Field::LastThirtyDaysJobIncome => ("lastThirtyDaysJobIncome", "lastThirtyDaysJobIncome"),
            Field::WhoseJobIsIt => ("householdSelectionForIncome", "whoseJobIsIt"),
            Field::IsSelfEmployment => ("selfEmployment", "selfEmployment"),
            Field::PaidByTheHour => ("paidByTheHour", "paidByTheHour"),
            Field::HourlyWage => ("hourlyWage", "hourlyWage"),
            Field::HoursAWeek => ("hoursAWeek", "hoursAWeek"),
            Field::PayPeriod => ("payPeriod", "payPeriod"),
            Field::IncomePerPayPeriod => ("incomePerPayPeriod", "incomePerPayPeriod"),
            Field::LivingSituation => ("livingSituation", "livingSituation"),
            Field::IdentifyCounty => ("identifyCounty", "county"),
            Field::FirstName => ("personalInfo", "firstName"),
            Field::LastName => ("personalInfo", "lastName"),
            Field::UnearnedIncomeCcap => ("unearnedIncomeCcap", "unearnedIncomeCcap"),
            Field::BasicCriteria => ("basicCriteria", "basicCriteria"),
            Field::HasDisability => ("disability", "hasDisability"),
            Field::GoingToSchool => ("goingToSchool", "goingToSchool"),
            Field::LookingForJob => ("jobSearch", "currentlyLookingForJob"),
            Field::WhoIsGoingToSchool => ("whoIsGoingToSchool", "whoIsGoingToSchool"),
        }
    }

    pub fn first_value<'a>(&self, pages: &'a PagesData) -> Option<&'a str> {
        pages.first_value(self.page_name(), self.input_name())
    }

    pub fn values<'a>(&self, pages: &'a PagesData) -> Option<&'a [String]> {
        pages.values(self.page_name(), self.input_name())
    }

    /// True when the first answer is literally `true`.
    pub fn is_true(&self, pages: &PagesData) -> bool {
        self.first_value(pages)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

/// A known repeated group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Jobs,
    Household,
}

impl Group {
    pub fn name(&self) -> &'static str {
        match self {
            Group::Jobs => "jobs",
            Group::Household => "household",
        }
    }

    /// Values of `field` across every iteration of the group.
    ///
    /// `None` when the group has never been started; iterations that did not
    /// answer the field contribute nothing.
    pub fn values<'a>(&self, data: &'a ApplicationData, field: Field) -> Option<Vec<&'a str>> {
        let subworkflow = data.subworkflow(self.name())?;
        Some(
            subworkflow
                .iter()
                .filter_map(|iteration| field.values(&iteration.pages))
                .flatten()
                .map(String::as_str)
                .collect(),
        )
    }
}

/// A job iteration whose owner selection names the applicant.
pub fn is_applicants_job(job_pages: &PagesData) -> bool {
    Field::WhoseJobIsIt
        .values(job_pages)
        .is_some_and(|owners| owners.iter().any(|owner| owner.contains("applicant")))
}

/// Applicant's full name as entered on the personal info page.
pub fn full_name(pages: &PagesData) -> String {
    [Field::FirstName, Field::LastName]
        .iter()
        .filter_map(|field| field.first_value(pages))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{InputData, Iteration};

    #[test]
    fn group_values_distinguish_missing_group_from_missing_answers() {
        let mut data = ApplicationData::new();
        assert_eq!(Group::Jobs.values(&data, Field::IsSelfEmployment), None);

        data.add_iteration("jobs", Iteration::new(PagesData::new()));
        let mut answered = PagesData::new();
        answered.set_input("selfEmployment", "selfEmployment", InputData::new(["true"]));
        data.add_iteration("jobs", Iteration::new(answered));

        assert_eq!(Group::Jobs.values(&data, Field::IsSelfEmployment), Some(vec!["true"]));
    }

    #[test]
    fn full_name_joins_present_parts() {
        let mut pages = PagesData::new();
        pages.set_input("personalInfo", "firstName", InputData::new(["Jane"]));
        assert_eq!(full_name(&pages), "Jane");
        pages.set_input("personalInfo", "lastName", InputData::new(["Doe"]));
        assert_eq!(full_name(&pages), "Jane Doe");
    }
}
