use crate::data::{ApplicationData, Iteration, PageData, PagesData};

/// Read-only page lookup used by condition evaluation.
pub trait PageLookup {
    fn page(&self, page_name: &str) -> Option<&PageData>;
}

impl PageLookup for PagesData {
    fn page(&self, page_name: &str) -> Option<&PageData> {
        PagesData::page(self, page_name)
    }
}

impl PageLookup for ApplicationData {
    fn page(&self, page_name: &str) -> Option<&PageData> {
        self.pages.page(page_name)
    }
}

/// Iteration-local pages overlaid on the top-level pages.
///
/// Lookups check the iteration first and fall back to the top level. Neither
/// source is copied or mutated.
#[derive(Debug, Clone, Copy)]
pub struct LayeredPages<'a> {
    top: &'a PagesData,
    local: Option<&'a PagesData>,
}

impl<'a> LayeredPages<'a> {
    pub fn top_level(top: &'a PagesData) -> Self {
        Self { top, local: None }
    }

    pub fn with_iteration(top: &'a PagesData, iteration: &'a Iteration) -> Self {
        Self {
            top,
            local: Some(&iteration.pages),
        }
    }

    pub fn first_value(&self, page_name: &str, input_name: &str) -> Option<&'a str> {
        self.page_ref(page_name)?
            .get(input_name)
            .and_then(|input| input.first())
    }

    pub fn values(&self, page_name: &str, input_name: &str) -> Option<&'a [String]> {
        self.page_ref(page_name)?
            .get(input_name)
            .map(|input| input.values.as_slice())
    }

    fn page_ref(&self, page_name: &str) -> Option<&'a PageData> {
        self.local
            .and_then(|local| local.page(page_name))
            .or_else(|| self.top.page(page_name))
    }
}

impl PageLookup for LayeredPages<'_> {
    fn page(&self, page_name: &str) -> Option<&PageData> {
        self.page_ref(page_name)
    }
}
