use std::collections::HashMap;

use uuid::Uuid;

use crate::config::PageGroupConfig;
use crate::data::Iteration;

/// Scope an iteration belongs to and its position among the scope's iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationScopeInfo {
    pub scope: String,
    pub index: usize,
}

/// Assigns stable scope-local indices to iterations for one field generation call.
///
/// Every preparer shares the same tracker, so an iteration keeps the index it
/// was first given no matter which preparer asks again. Build a new tracker
/// per generation call; indices are never carried between calls.
#[derive(Debug, Default)]
pub struct IterationScopeTracker {
    scopes_to_iterations: HashMap<String, Vec<Uuid>>,
}

impl IterationScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope_info(
        &mut self,
        group: &PageGroupConfig,
        iteration: &Iteration,
    ) -> Option<IterationScopeInfo> {
        let scope = scope_for_iteration(group, iteration)?;
        let iterations = self.scopes_to_iterations.entry(scope.to_string()).or_default();
        let index = match iterations.iter().position(|id| *id == iteration.id) {
            Some(index) => index,
            None => {
                iterations.push(iteration.id);
                iterations.len() - 1
            }
        };
        tracing::trace!(scope, index, iteration = %iteration.id, "resolved iteration scope");
        Some(IterationScopeInfo {
            scope: scope.to_string(),
            index,
        })
    }
}

fn scope_for_iteration<'a>(group: &'a PageGroupConfig, iteration: &Iteration) -> Option<&'a str> {
    let mut matching = group
        .scopes
        .iter()
        .filter(|scope| scope.condition.evaluate(&iteration.pages));
    let first = matching.next()?;
    let others: Vec<&str> = matching.map(|scope| scope.name.as_str()).collect();
    if !others.is_empty() {
        tracing::warn!(
            scope = %first.name,
            ignored = ?others,
            iteration = %iteration.id,
            "iteration matches several scopes; using the first declared"
        );
    }
    Some(first.name.as_str())
}
