use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Values submitted for one input on one page.
///
/// A single question may produce several values (a date split into
/// month/day/year, a multi-select). An empty list is an answer left blank,
/// which is distinct from the input being absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputData {
    pub values: Vec<String>,
}

impl InputData {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// True when there is no value or every value is whitespace.
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|value| value.trim().is_empty())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|stored| stored == value)
    }
}

/// Inputs answered on one page, keyed by input name.
pub type PageData = BTreeMap<String, InputData>;

/// Pages answered at one level of the application, keyed by page name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PagesData {
    pages: BTreeMap<String, PageData>,
}

impl PagesData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when the page was never submitted (for instance because it was skipped).
    pub fn page(&self, page_name: &str) -> Option<&PageData> {
        self.pages.get(page_name)
    }

    pub fn input(&self, page_name: &str, input_name: &str) -> Option<&InputData> {
        self.page(page_name)?.get(input_name)
    }

    pub fn values(&self, page_name: &str, input_name: &str) -> Option<&[String]> {
        self.input(page_name, input_name)
            .map(|input| input.values.as_slice())
    }

    pub fn first_value(&self, page_name: &str, input_name: &str) -> Option<&str> {
        self.input(page_name, input_name)?.first()
    }

    pub fn contains_page(&self, page_name: &str) -> bool {
        self.pages.contains_key(page_name)
    }

    /// Replaces the values for one input, creating the page if needed.
    pub fn set_input(&mut self, page_name: &str, input_name: &str, input: InputData) {
        self.pages
            .entry(page_name.to_string())
            .or_default()
            .insert(input_name.to_string(), input);
    }

    pub fn remove_page(&mut self, page_name: &str) -> Option<PageData> {
        self.pages.remove(page_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PageData)> {
        self.pages.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl FromIterator<(String, PageData)> for PagesData {
    fn from_iter<T: IntoIterator<Item = (String, PageData)>>(iter: T) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

/// One occurrence of a repeated group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iteration {
    pub id: Uuid,
    #[serde(default)]
    pub pages: PagesData,
}

impl Iteration {
    pub fn new(pages: PagesData) -> Self {
        Self {
            id: Uuid::new_v4(),
            pages,
        }
    }
}

/// Ordered occurrences of one repeated group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subworkflow {
    iterations: Vec<Iteration>,
}

impl Subworkflow {
    pub fn iter(&self) -> std::slice::Iter<'_, Iteration> {
        self.iterations.iter()
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn last(&self) -> Option<&Iteration> {
        self.iterations.last()
    }

    pub fn iteration(&self, id: Uuid) -> Option<&Iteration> {
        self.iterations.iter().find(|iteration| iteration.id == id)
    }

    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.iterations
            .iter()
            .position(|iteration| iteration.id == id)
    }
}

impl<'a> IntoIterator for &'a Subworkflow {
    type Item = &'a Iteration;
    type IntoIter = std::slice::Iter<'a, Iteration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iterations.iter()
    }
}

/// Root aggregate of everything answered in one application session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationData {
    #[serde(default)]
    pub pages: PagesData,
    #[serde(default)]
    pub subworkflows: BTreeMap<String, Subworkflow>,
}

impl ApplicationData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, page_name: &str) -> Option<&PageData> {
        self.pages.page(page_name)
    }

    /// `None` if the page or input is absent; otherwise the stored values, possibly empty.
    pub fn input_values(&self, page_name: &str, input_name: &str) -> Option<&[String]> {
        self.pages.values(page_name, input_name)
    }

    pub fn subworkflow(&self, name: &str) -> Option<&Subworkflow> {
        self.subworkflows.get(name)
    }

    pub fn set_input(&mut self, page_name: &str, input_name: &str, input: InputData) {
        self.pages.set_input(page_name, input_name, input);
    }

    /// Appends a completed iteration and returns its identifier.
    ///
    /// A fresh identifier is drawn if the incoming one already exists in the
    /// group, so identifiers stay unique within a subworkflow.
    pub fn add_iteration(&mut self, group_name: &str, mut iteration: Iteration) -> Uuid {
        let subworkflow = self.subworkflows.entry(group_name.to_string()).or_default();
        while subworkflow.iteration(iteration.id).is_some() {
            iteration.id = Uuid::new_v4();
        }
        let id = iteration.id;
        subworkflow.iterations.push(iteration);
        id
    }

    pub fn remove_iteration(&mut self, group_name: &str, id: Uuid) -> Option<Iteration> {
        let subworkflow = self.subworkflows.get_mut(group_name)?;
        let index = subworkflow.index_of(id)?;
        let removed = subworkflow.iterations.remove(index);
        if subworkflow.is_empty() {
            self.subworkflows.remove(group_name);
        }
        Some(removed)
    }
}
