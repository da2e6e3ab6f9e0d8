use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How downstream consumers should serialize a field's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentFieldType {
    /// Free text.
    #[default]
    SingleValue,
    /// One code out of a fixed option set.
    EnumeratedSingleValue,
    /// Several codes out of a fixed option set.
    EnumeratedMultiValue,
}

/// One flat, typed output unit of the field pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentField {
    pub group_name: String,
    pub name: String,
    pub values: Vec<String>,
    pub field_type: DocumentFieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<usize>,
}

impl DocumentField {
    pub fn new(
        group_name: impl Into<String>,
        name: impl Into<String>,
        values: Vec<String>,
        field_type: DocumentFieldType,
    ) -> Self {
        Self {
            group_name: group_name.into(),
            name: name.into(),
            values,
            field_type,
            iteration: None,
        }
    }

    pub fn single(
        group_name: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(group_name, name, vec![value.into()], DocumentFieldType::SingleValue)
    }

    pub fn enumerated(
        group_name: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(
            group_name,
            name,
            vec![value.into()],
            DocumentFieldType::EnumeratedSingleValue,
        )
    }

    pub fn at_iteration(mut self, index: usize) -> Self {
        self.iteration = Some(index);
        self
    }
}

/// Downstream artifact a field set is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Document {
    /// Combined application form.
    Caf,
    /// Certain populations (health care) application.
    CertainPops,
    /// Child care assistance application.
    Ccap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recipient {
    Client,
    Caseworker,
}

impl Document {
    pub fn as_str(&self) -> &'static str {
        match self {
            Document::Caf => "CAF",
            Document::CertainPops => "CERTAIN_POPS",
            Document::Ccap => "CCAP",
        }
    }
}

impl Recipient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recipient::Client => "CLIENT",
            Recipient::Caseworker => "CASEWORKER",
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Document {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().replace('-', "_").as_str() {
            "CAF" => Ok(Document::Caf),
            "CERTAIN_POPS" => Ok(Document::CertainPops),
            "CCAP" => Ok(Document::Ccap),
            _ => Err(format!("unknown document '{}'", value)),
        }
    }
}

impl FromStr for Recipient {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "CLIENT" => Ok(Recipient::Client),
            "CASEWORKER" => Ok(Recipient::Caseworker),
            _ => Err(format!("unknown recipient '{}'", value)),
        }
    }
}
