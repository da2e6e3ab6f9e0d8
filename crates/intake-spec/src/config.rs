use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::data::{ApplicationData, Iteration};
use crate::field::{DocumentFieldType, Recipient};
use crate::view::LayeredPages;

/// Kind of control an input is collected with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputType {
    #[default]
    Text,
    LongText,
    Date,
    Number,
    Radio,
    Checkbox,
    Select,
    YesNo,
    Money,
    Incrementer,
    Textarea,
    HourlyWage,
    Custom,
}

/// One question declared on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: InputType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follow_ups: Vec<InputConfig>,
}

/// Selects the data view a skip condition is evaluated against.
///
/// Without a group the condition sees the top-level pages; with a group it
/// sees one iteration of that group overlaid on the top-level pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageDatasource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

/// Static configuration of one page in the flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<InputConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<PageDatasource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_condition: Option<Condition>,
}

impl PageConfig {
    /// A page with no inputs collects nothing (informational or interstitial pages).
    pub fn is_static(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Inputs with their follow-ups flattened in declaration order.
    pub fn flattened_inputs(&self) -> Vec<&InputConfig> {
        self.inputs
            .iter()
            .flat_map(|input| std::iter::once(input).chain(input.follow_ups.iter()))
            .collect()
    }

    pub fn declares_input(&self, input_name: &str) -> bool {
        self.flattened_inputs()
            .iter()
            .any(|input| input.name == input_name)
    }

    /// Whether the flow should pass over this page.
    ///
    /// Always false unless both a datasource and a skip condition are set.
    /// `iteration` is the repeated-group occurrence in progress, if any; for
    /// a grouped datasource without one, the group's last iteration is used.
    pub fn should_skip(&self, data: &ApplicationData, iteration: Option<&Iteration>) -> bool {
        let (Some(datasource), Some(condition)) = (&self.datasource, &self.skip_condition) else {
            return false;
        };

        let view = match &datasource.group_name {
            None => LayeredPages::top_level(&data.pages),
            Some(group) => match iteration
                .or_else(|| data.subworkflow(group).and_then(|subworkflow| subworkflow.last()))
            {
                Some(iteration) => LayeredPages::with_iteration(&data.pages, iteration),
                None => LayeredPages::top_level(&data.pages),
            },
        };

        let skip = condition.evaluate(&view);
        tracing::debug!(page = %self.name, skip, "evaluated skip condition");
        skip
    }

    pub fn adjacent_page(&self, is_backwards: bool) -> Option<&str> {
        if is_backwards {
            self.previous_page.as_deref()
        } else {
            self.next_page.as_deref()
        }
    }
}

/// A named subset of a group's iterations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScopeDefinition {
    pub name: String,
    pub condition: Condition,
}

/// Configuration of one repeated group (subworkflow).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageGroupConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<String>,
    /// Scope definitions in declaration order; the first matching scope wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<ScopeDefinition>,
}

/// Where a derived value's output comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedValueSource {
    Literal { value: String },
    Reference { page_name: String, input_name: String },
}

/// A field emitted when its condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DerivedValueConfig {
    pub group_name: String,
    pub name: String,
    #[serde(default)]
    pub field_type: DocumentFieldType,
    pub value: DerivedValueSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Evaluate per iteration of this subworkflow, emitting indexed fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subworkflow: Option<String>,
}

/// Cover-page instructions for one county, worded for each recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CountyInstructions {
    pub client: String,
    pub caseworker: String,
}

impl CountyInstructions {
    pub fn for_recipient(&self, recipient: Recipient) -> &str {
        match recipient {
            Recipient::Client => &self.client,
            Recipient::Caseworker => &self.caseworker,
        }
    }
}

/// The full, immutable flow configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PagesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub pages: Vec<PageConfig>,
    #[serde(default, skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub page_groups: std::collections::BTreeMap<String, PageGroupConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub derived_values: Vec<DerivedValueConfig>,
    /// Keyed by county name; `Other` covers every county not listed.
    #[serde(default, skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub county_instructions: std::collections::BTreeMap<String, CountyInstructions>,
}

impl PagesConfig {
    pub fn page(&self, name: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|page| page.name == name)
    }

    pub fn page_group(&self, name: &str) -> Option<&PageGroupConfig> {
        self.page_groups.get(name)
    }
}
