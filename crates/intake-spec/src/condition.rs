use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::data::InputData;
use crate::view::PageLookup;

/// Boolean condition over answered pages, used for skip rules, scopes and derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Condition {
    Composite(CompositeCondition),
    Leaf(LeafCondition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompositeCondition {
    pub logical_operator: LogicalOperator,
    pub conditions: Vec<Condition>,
}

/// Comparison applied to the stored values of one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    /// Every comparison value is stored.
    #[default]
    Contains,
    /// No comparison value is stored.
    DoesNotContain,
    /// At least one stored value is among the comparison values.
    OneOf,
    /// The first stored value equals the first comparison value.
    Equals,
    /// Some stored value contains the first comparison value as text.
    ContainsSubstring,
    IsBlank,
    IsNotBlank,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LeafCondition {
    pub page_name: String,
    pub input: String,
    #[serde(default)]
    pub matcher: Matcher,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl LeafCondition {
    pub fn matches(&self, input: &InputData) -> bool {
        match self.matcher {
            Matcher::Contains => self.values.iter().all(|value| input.contains(value)),
            Matcher::DoesNotContain => !self.values.iter().any(|value| input.contains(value)),
            Matcher::OneOf => input
                .values
                .iter()
                .any(|stored| self.values.contains(stored)),
            Matcher::Equals => match (input.first(), self.values.first()) {
                (Some(stored), Some(expected)) => stored == expected,
                _ => false,
            },
            Matcher::ContainsSubstring => self.values.first().is_some_and(|needle| {
                input
                    .values
                    .iter()
                    .any(|stored| stored.contains(needle.as_str()))
            }),
            Matcher::IsBlank => input.is_blank(),
            Matcher::IsNotBlank => !input.is_blank(),
        }
    }
}

impl Condition {
    pub fn leaf(
        page_name: impl Into<String>,
        input: impl Into<String>,
        matcher: Matcher,
        values: &[&str],
    ) -> Self {
        Condition::Leaf(LeafCondition {
            page_name: page_name.into(),
            input: input.into(),
            matcher,
            values: values.iter().map(|value| value.to_string()).collect(),
        })
    }

    pub fn all(conditions: Vec<Condition>) -> Self {
        Condition::Composite(CompositeCondition {
            logical_operator: LogicalOperator::And,
            conditions,
        })
    }

    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Composite(CompositeCondition {
            logical_operator: LogicalOperator::Or,
            conditions,
        })
    }

    /// Evaluates the condition against a read-only page view.
    ///
    /// A leaf whose page or input is absent is false: a page behind a
    /// satisfied skip condition has no answer, and that must not count as met.
    pub fn evaluate(&self, view: &impl PageLookup) -> bool {
        match self {
            Condition::Leaf(leaf) => view
                .page(&leaf.page_name)
                .and_then(|page| page.get(&leaf.input))
                .is_some_and(|input| leaf.matches(input)),
            Condition::Composite(composite) => match composite.logical_operator {
                LogicalOperator::And => composite
                    .conditions
                    .iter()
                    .all(|condition| condition.evaluate(view)),
                LogicalOperator::Or => composite
                    .conditions
                    .iter()
                    .any(|condition| condition.evaluate(view)),
            },
        }
    }

    /// Every `(page, input)` pair referenced by a leaf, depth first.
    pub fn referenced_inputs(&self) -> Vec<(&str, &str)> {
        let mut found = Vec::new();
        self.collect_inputs(&mut found);
        found
    }

    fn collect_inputs<'a>(&'a self, found: &mut Vec<(&'a str, &'a str)>) {
        match self {
            Condition::Leaf(leaf) => found.push((&leaf.page_name, &leaf.input)),
            Condition::Composite(composite) => {
                for condition in &composite.conditions {
                    condition.collect_inputs(found);
                }
            }
        }
    }
}
