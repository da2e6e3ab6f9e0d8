use crate::catalog::{Field, Group};
use crate::data::{ApplicationData, PagesData};
use crate::field::{Document, DocumentField, Recipient};
use crate::scope::IterationScopeTracker;

use super::DocumentFieldPreparer;

const FIELD: &str = "ccapHasCostsForChildCare";

/// Flags child care costs when someone who asked for child care assistance is
/// in school or looking for work.
///
/// An applicant living alone qualifies by going to school or searching for a
/// job. In a household, the person named as going to school must have chosen
/// child care assistance: the applicant by the `applicant` suffix, a member by
/// their iteration id.
pub struct HasCostForChildcarePreparer;

impl DocumentFieldPreparer for HasCostForChildcarePreparer {
    fn name(&self) -> &'static str {
        "has_cost_for_childcare"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        _document: Document,
        _recipient: Recipient,
        _scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        if has_cost_for_childcare(data) {
            vec![DocumentField::enumerated(FIELD, FIELD, "true")]
        } else {
            Vec::new()
        }
    }
}

fn has_cost_for_childcare(data: &ApplicationData) -> bool {
    let pages = &data.pages;
    let applicant_chose_ccap = chose_ccap(pages, Field::ApplicantPrograms);

    let household = data
        .subworkflow(Group::Household.name())
        .filter(|members| !members.is_empty());
    let Some(members) = household else {
        return applicant_chose_ccap
            && (Field::GoingToSchool.is_true(pages) || Field::LookingForJob.is_true(pages));
    };

    if !Field::GoingToSchool.is_true(pages) {
        return false;
    }
    let students = Field::WhoIsGoingToSchool.values(pages).unwrap_or_default();
    students.iter().any(|student| {
        if student.ends_with("applicant") {
            return applicant_chose_ccap;
        }
        members.iter().any(|member| {
            student.ends_with(&member.id.to_string())
                && chose_ccap(&member.pages, Field::HouseholdPrograms)
        })
    })
}

fn chose_ccap(pages: &PagesData, programs: Field) -> bool {
    programs
        .values(pages)
        .is_some_and(|values| values.iter().any(|program| program == "CCAP"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{InputData, Iteration};

    fn prepare(data: &ApplicationData) -> Vec<DocumentField> {
        HasCostForChildcarePreparer.prepare(data, Document::Ccap, Recipient::Client, &mut IterationScopeTracker::new())
    }

    fn has_costs() -> Vec<DocumentField> {
        vec![DocumentField::enumerated(FIELD, FIELD, "true")]
    }

    fn applicant(programs: &str, answers: &[(Field, &str)]) -> ApplicationData {
        let mut data = ApplicationData::new();
        data.set_input("choosePrograms", "programs", InputData::new([programs]));
        for (field, value) in answers {
            data.set_input(field.page_name(), field.input_name(), InputData::new([*value]));
        }
        data
    }

    fn add_member(data: &mut ApplicationData, programs: &str) -> String {
        let mut pages = PagesData::new();
        pages.set_input("householdMemberInfo", "firstName", InputData::new(["Daria"]));
        pages.set_input("householdMemberInfo", "programs", InputData::new([programs]));
        data.add_iteration("household", Iteration::new(pages)).to_string()
    }

    #[test]
    fn applicant_living_alone_in_school_or_job_search() {
        let in_school = applicant("CCAP", &[(Field::GoingToSchool, "true")]);
        assert_eq!(prepare(&in_school), has_costs());

        let job_search = applicant("CCAP", &[(Field::LookingForJob, "true")]);
        assert_eq!(prepare(&job_search), has_costs());
    }

    #[test]
    fn applicant_living_alone_neither_in_school_nor_searching() {
        let data = applicant(
            "CCAP",
            &[(Field::GoingToSchool, "false"), (Field::LookingForJob, "false")],
        );
        assert!(prepare(&data).is_empty());
    }

    #[test]
    fn household_member_named_as_student() {
        let mut data = applicant("SNAP", &[(Field::GoingToSchool, "true")]);
        let id = add_member(&mut data, "CCAP");
        data.set_input(
            "whoIsGoingToSchool",
            "whoIsGoingToSchool",
            InputData::new([format!("some name {id}")]),
        );
        assert_eq!(prepare(&data), has_costs());
    }

    #[test]
    fn applicant_in_household_named_as_student() {
        let mut data = applicant(
            "CCAP",
            &[(Field::GoingToSchool, "true"), (Field::WhoIsGoingToSchool, "some name applicant")],
        );
        add_member(&mut data, "SNAP");
        assert_eq!(prepare(&data), has_costs());
    }

    #[test]
    fn student_without_child_care_request_in_household() {
        let mut data = applicant(
            "SNAP",
            &[(Field::GoingToSchool, "true"), (Field::WhoIsGoingToSchool, "some name applicant")],
        );
        add_member(&mut data, "CCAP");
        assert!(prepare(&data).is_empty());
    }

    #[test]
    fn missing_answers_emit_nothing() {
        assert!(prepare(&ApplicationData::new()).is_empty());
    }
}
