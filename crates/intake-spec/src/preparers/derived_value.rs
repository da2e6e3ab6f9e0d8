use crate::config::{DerivedValueConfig, DerivedValueSource};
use crate::data::ApplicationData;
use crate::field::{Document, DocumentField, Recipient};
use crate::scope::IterationScopeTracker;
use crate::view::LayeredPages;

use super::DocumentFieldPreparer;

/// Configuration-driven fields: a literal or a copied answer, emitted when
/// the rule's condition holds.
///
/// Rules bound to a subworkflow are evaluated once per iteration against the
/// iteration's pages layered over the top level, and emit indexed fields.
pub struct DerivedValuePreparer {
    rules: Vec<DerivedValueConfig>,
}

impl DerivedValuePreparer {
    pub fn new(rules: Vec<DerivedValueConfig>) -> Self {
        Self { rules }
    }
}

impl DocumentFieldPreparer for DerivedValuePreparer {
    fn name(&self) -> &'static str {
        "derived_value"
    }

    fn prepare(
        &self,
        data: &ApplicationData,
        _document: Document,
        _recipient: Recipient,
        _scopes: &mut IterationScopeTracker,
    ) -> Vec<DocumentField> {
        let mut fields = Vec::new();
        for rule in &self.rules {
            match &rule.subworkflow {
                None => {
                    let view = LayeredPages::top_level(&data.pages);
                    fields.extend(derive(rule, &view));
                }
                Some(group) => {
                    let Some(subworkflow) = data.subworkflow(group) else {
                        continue;
                    };
                    for (index, iteration) in subworkflow.iter().enumerate() {
                        let view = LayeredPages::with_iteration(&data.pages, iteration);
                        fields.extend(derive(rule, &view).map(|field| field.at_iteration(index)));
                    }
                }
            }
        }
        fields
    }
}

fn derive(rule: &DerivedValueConfig, view: &LayeredPages<'_>) -> Option<DocumentField> {
    if let Some(condition) = &rule.condition
        && !condition.evaluate(view)
    {
        return None;
    }

    let values = match &rule.value {
        DerivedValueSource::Literal { value } => vec![value.clone()],
        DerivedValueSource::Reference { page_name, input_name } => {
            let Some(values) = view.values(page_name, input_name) else {
                tracing::debug!(
                    group = %rule.group_name,
                    name = %rule.name,
                    page = %page_name,
                    input = %input_name,
                    "derived value reference not answered; skipping"
                );
                return None;
            };
            values.to_vec()
        }
    };
    Some(DocumentField::new(
        rule.group_name.as_str(),
        rule.name.as_str(),
        values,
        rule.field_type,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, Matcher};
    use crate::data::{InputData, Iteration, PagesData};
    use crate::field::DocumentFieldType;

    fn rule(value: DerivedValueSource, condition: Option<Condition>) -> DerivedValueConfig {
        DerivedValueConfig {
            group_name: "homeAddress".into(),
            name: "sameMailingAddress".into(),
            field_type: DocumentFieldType::EnumeratedSingleValue,
            value,
            condition,
            subworkflow: None,
        }
    }

    fn literal(value: &str) -> DerivedValueSource {
        DerivedValueSource::Literal { value: value.into() }
    }

    fn prepare(rules: Vec<DerivedValueConfig>, data: &ApplicationData) -> Vec<DocumentField> {
        DerivedValuePreparer::new(rules).prepare(
            data,
            Document::Caf,
            Recipient::Client,
            &mut IterationScopeTracker::new(),
        )
    }

    #[test]
    fn literal_is_emitted_only_when_condition_holds() {
        let condition = Condition::leaf("mailingAddress", "sameMailingAddress", Matcher::Contains, &["true"]);
        let rules = vec![rule(literal("true"), Some(condition))];

        assert!(prepare(rules.clone(), &ApplicationData::new()).is_empty());

        let mut data = ApplicationData::new();
        data.set_input("mailingAddress", "sameMailingAddress", InputData::new(["true"]));
        assert_eq!(
            prepare(rules, &data),
            vec![DocumentField::enumerated("homeAddress", "sameMailingAddress", "true")]
        );
    }

    #[test]
    fn references_copy_answers_and_skip_when_missing() {
        let reference = DerivedValueSource::Reference {
            page_name: "homeAddress".into(),
            input_name: "zipCode".into(),
        };
        let rules = vec![rule(reference, None)];
        assert!(prepare(rules.clone(), &ApplicationData::new()).is_empty());

        let mut data = ApplicationData::new();
        data.set_input("homeAddress", "zipCode", InputData::new(["55401"]));
        let fields = prepare(rules, &data);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].values, vec!["55401"]);
    }

    #[test]
    fn subworkflow_rules_see_iteration_and_top_level_pages() {
        let condition = Condition::all(vec![
            Condition::leaf("householdMemberInfo", "relationship", Matcher::Contains, &["child"]),
            Condition::leaf("choosePrograms", "programs", Matcher::Contains, &["CCAP"]),
        ]);
        let mut rules = vec![rule(literal("true"), Some(condition))];
        rules[0].group_name = "householdMember".into();
        rules[0].name = "needsChildCare".into();
        rules[0].subworkflow = Some("household".into());

        let mut data = ApplicationData::new();
        data.set_input("choosePrograms", "programs", InputData::new(["CCAP"]));
        for relationship in ["spouse", "child", "child"] {
            let mut pages = PagesData::new();
            pages.set_input("householdMemberInfo", "relationship", InputData::new([relationship]));
            data.add_iteration("household", Iteration::new(pages));
        }

        let indices: Vec<_> = prepare(rules, &data).into_iter().map(|field| field.iteration).collect();
        assert_eq!(indices, vec![Some(1), Some(2)]);
    }
}
