use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::config::{DerivedValueSource, PagesConfig};

/// One inconsistency found in a flow configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigIssue {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValidation {
    pub valid: bool,
    pub issues: Vec<ConfigIssue>,
}

impl ConfigValidation {
    pub fn codes(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.code.as_str()).collect()
    }
}

/// Checks a flow configuration for inconsistencies that would otherwise only
/// show up as silently false conditions or unreachable pages.
///
/// Scope ambiguity is only detected when two scopes of a group have
/// structurally identical conditions. Scopes whose different conditions can
/// both match one iteration pass here; [`IterationScopeTracker`] warns about
/// them when it sees such an iteration and keeps the first declared scope.
///
/// [`IterationScopeTracker`]: crate::scope::IterationScopeTracker
pub fn validate_config(config: &PagesConfig) -> ConfigValidation {
    let mut issues = Vec::new();

    let mut seen = BTreeSet::new();
    for page in &config.pages {
        if !seen.insert(page.name.as_str()) {
            issues.push(issue(
                "duplicate_page",
                format!("page '{}' is declared more than once", page.name),
                format!("/pages/{}", page.name),
            ));
        }
    }

    for page in &config.pages {
        for (direction, link) in [("next_page", &page.next_page), ("previous_page", &page.previous_page)] {
            if let Some(target) = link
                && config.page(target).is_none()
            {
                issues.push(issue(
                    "dangling_link",
                    format!("page '{}' links to unknown page '{}'", page.name, target),
                    format!("/pages/{}/{}", page.name, direction),
                ));
            }
        }

        if let Some(datasource) = &page.datasource
            && let Some(group) = &datasource.group_name
            && config.page_group(group).is_none()
        {
            issues.push(issue(
                "unknown_group",
                format!("page '{}' reads from undeclared group '{}'", page.name, group),
                format!("/pages/{}/datasource", page.name),
            ));
        }

        if let Some(condition) = &page.skip_condition {
            check_condition(
                config,
                condition,
                &format!("/pages/{}/skip_condition", page.name),
                &mut issues,
            );
        }
    }

    for (group_name, group) in &config.page_groups {
        for page in &group.pages {
            if config.page(page).is_none() {
                issues.push(issue(
                    "unknown_page",
                    format!("group '{}' lists unknown page '{}'", group_name, page),
                    format!("/page_groups/{}/pages", group_name),
                ));
            }
        }

        let mut names = BTreeSet::new();
        let mut conditions: BTreeMap<String, &str> = BTreeMap::new();
        for scope in &group.scopes {
            let path = format!("/page_groups/{}/scopes/{}", group_name, scope.name);
            if !names.insert(scope.name.as_str()) {
                issues.push(issue(
                    "duplicate_scope",
                    format!("group '{}' declares scope '{}' more than once", group_name, scope.name),
                    path.clone(),
                ));
            }
            check_condition(config, &scope.condition, &path, &mut issues);

            let key = serde_json::to_string(&scope.condition).unwrap_or_default();
            if let Some(existing) = conditions.get(&key) {
                issues.push(issue(
                    "ambiguous_scopes",
                    format!(
                        "scopes '{}' and '{}' of group '{}' have identical conditions",
                        existing, scope.name, group_name
                    ),
                    path.clone(),
                ));
            } else {
                conditions.insert(key, scope.name.as_str());
            }
        }
    }

    for (index, rule) in config.derived_values.iter().enumerate() {
        let path = format!("/derived_values/{}", index);
        if let Some(group) = &rule.subworkflow
            && config.page_group(group).is_none()
        {
            issues.push(issue(
                "unknown_group",
                format!("derived value '{}' iterates undeclared group '{}'", rule.name, group),
                path.clone(),
            ));
        }
        if let Some(condition) = &rule.condition {
            check_condition(config, condition, &format!("{}/condition", path), &mut issues);
        }
        if let DerivedValueSource::Reference { page_name, input_name } = &rule.value {
            check_input(config, page_name, input_name, &format!("{}/value", path), &mut issues);
        }
    }

    if !issues.is_empty() {
        tracing::debug!(count = issues.len(), "configuration has issues");
    }

    ConfigValidation {
        valid: issues.is_empty(),
        issues,
    }
}

fn check_condition(config: &PagesConfig, condition: &Condition, path: &str, issues: &mut Vec<ConfigIssue>) {
    for (page_name, input_name) in condition.referenced_inputs() {
        check_input(config, page_name, input_name, path, issues);
    }
}

fn check_input(
    config: &PagesConfig,
    page_name: &str,
    input_name: &str,
    path: &str,
    issues: &mut Vec<ConfigIssue>,
) {
    match config.page(page_name) {
        None => issues.push(issue(
            "unknown_page",
            format!("condition references unknown page '{}'", page_name),
            path.to_string(),
        )),
        Some(page) if !page.declares_input(input_name) => issues.push(issue(
            "unknown_input",
            format!("page '{}' has no input '{}'", page_name, input_name),
            path.to_string(),
        )),
        Some(_) => {}
    }
}

fn issue(code: &str, message: String, path: String) -> ConfigIssue {
    ConfigIssue {
        code: code.into(),
        message,
        path: Some(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Matcher;
    use crate::config::{InputConfig, PageConfig, PageGroupConfig, ScopeDefinition};

    fn page(name: &str, input: &str, next: Option<&str>) -> PageConfig {
        PageConfig {
            name: name.into(),
            inputs: vec![InputConfig {
                name: input.into(),
                kind: Default::default(),
                options: vec![],
                follow_ups: vec![],
            }],
            next_page: next.map(Into::into),
            previous_page: None,
            datasource: None,
            skip_condition: None,
        }
    }

    fn config() -> PagesConfig {
        PagesConfig {
            id: None,
            pages: vec![
                page("choosePrograms", "programs", Some("selfEmployment")),
                page("selfEmployment", "selfEmployment", None),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn consistent_configuration_is_valid() {
        let result = validate_config(&config());
        assert!(result.valid, "{:?}", result.issues);
    }

    #[test]
    fn reports_duplicates_and_dangling_links() {
        let mut config = config();
        config.pages.push(page("choosePrograms", "programs", Some("nowhere")));
        let result = validate_config(&config);
        assert!(!result.valid);
        assert_eq!(result.codes(), vec!["duplicate_page", "dangling_link"]);
    }

    #[test]
    fn reports_conditions_on_undeclared_inputs() {
        let mut config = config();
        config.pages[1].skip_condition = Some(Condition::all(vec![
            Condition::leaf("choosePrograms", "programz", Matcher::Contains, &["SNAP"]),
            Condition::leaf("ghost", "programs", Matcher::Contains, &["SNAP"]),
        ]));
        assert_eq!(validate_config(&config).codes(), vec!["unknown_input", "unknown_page"]);
    }

    #[test]
    fn reports_ambiguous_scopes() {
        let mut config = config();
        let condition = Condition::leaf("selfEmployment", "selfEmployment", Matcher::Contains, &["true"]);
        config.page_groups.insert(
            "jobs".into(),
            PageGroupConfig {
                pages: vec!["selfEmployment".into()],
                scopes: vec![
                    ScopeDefinition { name: "selfEmployed".into(), condition: condition.clone() },
                    ScopeDefinition { name: "selfEmployed".into(), condition: condition.clone() },
                    ScopeDefinition { name: "contractor".into(), condition },
                ],
            },
        );
        assert_eq!(
            validate_config(&config).codes(),
            vec!["duplicate_scope", "ambiguous_scopes", "ambiguous_scopes"]
        );
    }
}
