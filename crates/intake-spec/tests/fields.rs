use intake_spec::{
    ApplicationData, Document, DocumentField, DocumentFieldPipeline, Eligibility, PagesConfig,
    Recipient, decide,
};

fn flow() -> PagesConfig {
    serde_json::from_str(include_str!("fixtures/intake_flow.json")).expect("flow fixture")
}

fn application() -> ApplicationData {
    serde_json::from_str(include_str!("fixtures/application.json")).expect("application fixture")
}

fn fields(document: Document) -> Vec<DocumentField> {
    DocumentFieldPipeline::standard(&flow()).prepare_all_fields(&application(), document, Recipient::Client)
}

fn find<'a>(fields: &'a [DocumentField], group: &str, name: &str) -> Vec<&'a DocumentField> {
    fields
        .iter()
        .filter(|field| field.group_name == group && field.name == name)
        .collect()
}

#[test]
fn combined_application_fields() {
    let fields = fields(Document::Caf);

    assert_eq!(
        find(&fields, "livingSituation", "derivedLivingSituation")[0].values,
        vec!["TEMPORARILY_WITH_FRIENDS_OR_FAMILY"]
    );
    let programs: Vec<_> = fields
        .iter()
        .filter(|field| field.group_name == "applicantPrograms" && field.values == vec!["Yes"])
        .map(|field| field.name.as_str())
        .collect();
    assert_eq!(programs, vec!["SNAP", "CCAP"]);
    assert_eq!(find(&fields, "employee", "selfEmployed")[0].values, vec!["true"]);
    assert_eq!(find(&fields, "unearnedIncomeCcap", "BENEFITS")[0].values, vec!["true"]);
    assert_eq!(find(&fields, "unearnedIncomeCcap", "TRUST_MONEY")[0].values, vec!["false"]);
    assert!(fields.iter().all(|field| field.group_name != "basicCriteria"));
    assert_eq!(
        find(&fields, "snapExpeditedEligibility", "snapExpeditedEligibility")[0].values,
        vec!["ELIGIBLE"]
    );
}

#[test]
fn job_income_is_addressed_by_raw_and_scoped_position() {
    let fields = fields(Document::Caf);
    let addressed = |group: &str| -> Vec<(Option<usize>, String)> {
        find(&fields, group, "grossMonthlyIncome")
            .into_iter()
            .map(|field| (field.iteration, field.values[0].clone()))
            .collect()
    };

    assert_eq!(
        addressed("employee"),
        vec![
            (Some(0), "400.00".to_string()),
            (Some(1), "400.00".to_string()),
            (Some(2), "250.00".to_string()),
        ]
    );
    assert_eq!(
        addressed("applicant_employee"),
        vec![(Some(0), "400.00".to_string()), (Some(1), "250.00".to_string())]
    );
}

#[test]
fn certain_populations_only_report_the_applicants_jobs() {
    let fields = fields(Document::CertainPops);
    let indices: Vec<_> = find(&fields, "employee", "grossMonthlyIncome")
        .into_iter()
        .map(|field| field.iteration)
        .collect();
    assert_eq!(indices, vec![Some(0), Some(2)]);
    assert_eq!(find(&fields, "employee", "selfEmployed")[0].values, vec!["false"]);
}

#[test]
fn configured_derived_values_are_emitted() {
    let fields = fields(Document::Ccap);
    assert_eq!(find(&fields, "applicantInfo", "county")[0].values, vec!["Hennepin"]);
    assert_eq!(find(&fields, "applicantPrograms", "childCareRequested").len(), 1);
    let needs_care: Vec<_> = find(&fields, "householdMember", "needsChildCare")
        .into_iter()
        .map(|field| field.iteration)
        .collect();
    assert_eq!(needs_care, vec![Some(1)]);
}

#[test]
fn generation_is_repeatable() {
    assert_eq!(fields(Document::Caf), fields(Document::Caf));
}

#[test]
fn housing_costs_make_the_household_eligible() {
    let data = application();
    assert_eq!(decide(&data), Ok(Eligibility::Eligible));

    let mut cheaper = data.clone();
    cheaper.set_input(
        "homeExpensesAmount",
        "homeExpensesAmount",
        intake_spec::InputData::new(["100"]),
    );
    // 50 + 1050 is not below 100 + 490.
    assert_eq!(decide(&cheaper), Ok(Eligibility::NotEligible));
}

#[test]
fn cover_page_instructions_depend_on_the_recipient() {
    let pipeline = DocumentFieldPipeline::standard(&flow());
    let instructions = |recipient: Recipient| -> Vec<String> {
        let fields = pipeline.prepare_all_fields(&application(), Document::Caf, recipient);
        let values = find(&fields, "coverPage", "countyInstructions")[0].values.clone();
        values
    };

    assert_eq!(
        instructions(Recipient::Client),
        vec!["Hennepin County will contact you within 7 days about your application."]
    );
    assert_eq!(
        instructions(Recipient::Caseworker),
        vec!["Route to the Hennepin County intake queue."]
    );
}
