use std::collections::HashSet;

use thiserror::Error;

use crate::config::PagesConfig;
use crate::data::{ApplicationData, Iteration};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("page '{0}' is not configured")]
    UnknownPage(String),
    #[error("skip conditions loop back to page '{0}'")]
    Cycle(String),
}

impl PagesConfig {
    /// Resolves the page the user lands on when leaving `current`.
    ///
    /// Follows the static next/previous links, passing over every page whose
    /// skip condition holds. `Ok(None)` means the flow has no further page in
    /// that direction.
    pub fn resolve_landing_page(
        &self,
        current: &str,
        is_backwards: bool,
        data: &ApplicationData,
        iteration: Option<&Iteration>,
    ) -> Result<Option<String>, NavigationError> {
        let mut page = self
            .page(current)
            .ok_or_else(|| NavigationError::UnknownPage(current.to_string()))?;
        let mut visited = HashSet::from([current]);

        loop {
            let Some(candidate) = page.adjacent_page(is_backwards) else {
                tracing::debug!(from = current, "flow ends");
                return Ok(None);
            };
            if !visited.insert(candidate) {
                return Err(NavigationError::Cycle(candidate.to_string()));
            }
            page = self
                .page(candidate)
                .ok_or_else(|| NavigationError::UnknownPage(candidate.to_string()))?;
            if !page.should_skip(data, iteration) {
                tracing::debug!(from = current, to = candidate, is_backwards, "resolved landing page");
                return Ok(Some(candidate.to_string()));
            }
        }
    }
}
