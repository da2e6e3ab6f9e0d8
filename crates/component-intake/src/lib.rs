use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

use intake_spec::{
    ApplicationData, Condition, Document, DocumentFieldPipeline, Iteration, MoneyError,
    NavigationError, PagesConfig, Recipient, decide as decide_eligibility,
    validate_config as validate_pages_config,
};

const DEFAULT_FLOW: &str = include_str!("../../intake-spec/tests/fixtures/intake_flow.json");

#[derive(Debug, Error)]
enum ComponentError {
    #[error("failed to parse config: {0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("failed to parse application data: {0}")]
    DataParse(#[source] serde_json::Error),
    #[error("failed to parse condition: {0}")]
    ConditionParse(#[source] serde_json::Error),
    #[error("flow '{0}' is not available")]
    FlowUnavailable(String),
    #[error("page '{0}' is not configured")]
    UnknownPage(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("json encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),
    #[error("eligibility failed: {0}")]
    Money(#[from] MoneyError),
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct ComponentConfig {
    #[serde(default)]
    flow_json: Option<String>,
}

fn load_flow(config_json: &str) -> Result<PagesConfig, ComponentError> {
    let config = if config_json.trim().is_empty() {
        ComponentConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(ComponentError::ConfigParse)?
    };

    let flow_json = match config.flow_json.as_deref() {
        Some(flow_json) => flow_json,
        None => {
            tracing::debug!("using bundled intake flow");
            DEFAULT_FLOW
        }
    };

    serde_json::from_str(flow_json).map_err(ComponentError::ConfigParse)
}

fn parse_data(data_json: &str) -> Result<ApplicationData, ComponentError> {
    if data_json.trim().is_empty() {
        return Ok(ApplicationData::default());
    }
    serde_json::from_str(data_json).map_err(ComponentError::DataParse)
}

fn parse_context(ctx_json: &str) -> Value {
    serde_json::from_str(ctx_json).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Iteration named by the context's `iteration_id`, searched across every group.
fn context_iteration<'a>(ctx: &Value, data: &'a ApplicationData) -> Option<&'a Iteration> {
    let id = ctx.get("iteration_id").and_then(Value::as_str)?;
    data.subworkflows
        .values()
        .flat_map(|subworkflow| subworkflow.iter())
        .find(|iteration| iteration.id.to_string() == id)
}

fn respond(result: Result<Value, ComponentError>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|error| {
            json!({"error": format!("json encode: {}", error)}).to_string()
        }),
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

pub fn describe(flow_id: &str, config_json: &str) -> String {
    respond(load_flow(config_json).and_then(|flow| {
        if flow.id.as_deref() != Some(flow_id) {
            Err(ComponentError::FlowUnavailable(flow_id.to_string()))
        } else {
            serde_json::to_value(flow).map_err(ComponentError::JsonEncode)
        }
    }))
}

pub fn validate_config(config_json: &str) -> String {
    respond(load_flow(config_json).and_then(|flow| {
        serde_json::to_value(validate_pages_config(&flow)).map_err(ComponentError::JsonEncode)
    }))
}

pub fn should_skip(config_json: &str, page_name: &str, data_json: &str, ctx_json: &str) -> String {
    respond(load_flow(config_json).and_then(|flow| {
        let page = flow
            .page(page_name)
            .ok_or_else(|| ComponentError::UnknownPage(page_name.to_string()))?;
        let data = parse_data(data_json)?;
        let ctx = parse_context(ctx_json);
        let skip = page.should_skip(&data, context_iteration(&ctx, &data));
        Ok(json!({ "page": page_name, "skip": skip }))
    }))
}

pub fn next_page(config_json: &str, page_name: &str, data_json: &str, ctx_json: &str) -> String {
    respond(load_flow(config_json).and_then(|flow| {
        let data = parse_data(data_json)?;
        let ctx = parse_context(ctx_json);
        let is_backwards = ctx
            .get("backwards")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let landing = flow.resolve_landing_page(
            page_name,
            is_backwards,
            &data,
            context_iteration(&ctx, &data),
        )?;
        Ok(json!({
            "from": page_name,
            "direction": if is_backwards { "backward" } else { "forward" },
            "status": if landing.is_some() { "next" } else { "end" },
            "page": landing,
        }))
    }))
}

fn evaluate(condition_json: &str, data_json: &str) -> Result<Value, ComponentError> {
    let condition: Condition =
        serde_json::from_str(condition_json).map_err(ComponentError::ConditionParse)?;
    let data = parse_data(data_json)?;
    Ok(json!({ "result": condition.evaluate(&data) }))
}

pub fn evaluate_condition(condition_json: &str, data_json: &str) -> String {
    respond(evaluate(condition_json, data_json))
}

pub fn prepare_fields(config_json: &str, data_json: &str, document: &str, recipient: &str) -> String {
    respond(load_flow(config_json).and_then(|flow| {
        let document: Document = document.parse().map_err(ComponentError::InvalidArgument)?;
        let recipient: Recipient = recipient.parse().map_err(ComponentError::InvalidArgument)?;
        let data = parse_data(data_json)?;
        let fields = DocumentFieldPipeline::standard(&flow).prepare_all_fields(&data, document, recipient);
        serde_json::to_value(fields).map_err(ComponentError::JsonEncode)
    }))
}

pub fn decide(data_json: &str) -> String {
    respond(parse_data(data_json).and_then(|data| {
        let eligibility = decide_eligibility(&data)?;
        Ok(json!({ "eligibility": eligibility }))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn application(pages: Value) -> String {
        json!({ "pages": pages }).to_string()
    }

    #[test]
    fn describe_returns_bundled_flow() {
        let payload = describe("intake-flow", "");
        let flow: Value = serde_json::from_str(&payload).expect("valid json");
        assert_eq!(flow["id"], "intake-flow");
        assert_eq!(flow["pages"][0]["name"], "choosePrograms");
    }

    #[test]
    fn describe_rejects_other_flows() {
        let payload = describe("other-flow", "");
        let parsed: Value = serde_json::from_str(&payload).expect("json");
        assert_eq!(parsed["error"], "flow 'other-flow' is not available");
    }

    #[test]
    fn validate_config_reports_dangling_links() {
        let flow = json!({
            "id": "broken",
            "pages": [{ "name": "start", "next_page": "missing" }]
        });
        let config = json!({ "flow_json": flow.to_string() });
        let parsed: Value = serde_json::from_str(&validate_config(&config.to_string())).expect("json");
        assert_eq!(parsed["valid"], false);
        assert_eq!(parsed["issues"][0]["code"], "dangling_link");
    }

    #[test]
    fn should_skip_uses_the_named_iteration() {
        let data = json!({
            "subworkflows": {
                "jobs": [
                    {
                        "id": "0f6c3c1e-8f0a-4a53-9a52-1d8f3f0e5a01",
                        "pages": { "paidByTheHour": { "paidByTheHour": ["false"] } }
                    },
                    {
                        "id": "5b1a9a7e-2c4d-4d8e-b1f0-7e3a2c9d6b02",
                        "pages": { "paidByTheHour": { "paidByTheHour": ["true"] } }
                    }
                ]
            }
        })
        .to_string();

        let first = json!({ "iteration_id": "0f6c3c1e-8f0a-4a53-9a52-1d8f3f0e5a01" }).to_string();
        let parsed: Value =
            serde_json::from_str(&should_skip("", "hourlyWage", &data, &first)).expect("json");
        assert_eq!(parsed["skip"], true);

        // Without an iteration the last one is consulted.
        let parsed: Value = serde_json::from_str(&should_skip("", "hourlyWage", &data, "{}")).expect("json");
        assert_eq!(parsed["skip"], false);
    }

    #[test]
    fn next_page_passes_over_skipped_pages() {
        let data = application(json!({ "choosePrograms": { "programs": ["CASH"] } }));
        let parsed: Value =
            serde_json::from_str(&next_page("", "choosePrograms", &data, "{}")).expect("json");
        assert_eq!(parsed["status"], "next");
        assert_eq!(parsed["page"], "personalInfo");

        let back = json!({ "backwards": true }).to_string();
        let parsed: Value =
            serde_json::from_str(&next_page("", "personalInfo", &data, &back)).expect("json");
        assert_eq!(parsed["direction"], "backward");
        assert_eq!(parsed["page"], "choosePrograms");
    }

    #[test]
    fn next_page_reports_unknown_pages() {
        let parsed: Value = serde_json::from_str(&next_page("", "nowhere", "", "{}")).expect("json");
        assert_eq!(parsed["error"], "navigation failed: page 'nowhere' is not configured");
    }

    #[test]
    fn evaluate_condition_treats_absent_pages_as_false() {
        let condition = json!({
            "logical_operator": "OR",
            "conditions": [
                { "page_name": "choosePrograms", "input": "programs", "values": ["SNAP"] },
                { "page_name": "missing", "input": "anything", "matcher": "is_blank" }
            ]
        })
        .to_string();
        let data = application(json!({ "choosePrograms": { "programs": ["CCAP"] } }));
        let parsed: Value = serde_json::from_str(&evaluate_condition(&condition, &data)).expect("json");
        assert_eq!(parsed["result"], false);
    }

    #[test]
    fn prepare_fields_returns_flat_fields() {
        let data = application(json!({ "livingSituation": { "livingSituation": [] } }));
        let parsed: Value =
            serde_json::from_str(&prepare_fields("", &data, "caf", "client")).expect("json");
        let fields = parsed.as_array().expect("fields");
        assert_eq!(fields[0]["group_name"], "livingSituation");
        assert_eq!(fields[0]["values"][0], "UNKNOWN");
        assert_eq!(fields[0]["field_type"], "ENUMERATED_SINGLE_VALUE");
    }

    #[test]
    fn prepare_fields_words_instructions_for_the_recipient() {
        let data = application(json!({ "identifyCounty": { "county": ["Hennepin"] } }));
        let instructions = |recipient: &str| -> Value {
            let parsed: Value =
                serde_json::from_str(&prepare_fields("", &data, "caf", recipient)).expect("json");
            parsed
                .as_array()
                .expect("fields")
                .iter()
                .find(|field| field["name"] == "countyInstructions")
                .map(|field| field["values"][0].clone())
                .unwrap_or(Value::Null)
        };
        assert_eq!(
            instructions("caseworker"),
            "Route to the Hennepin County intake queue."
        );
        assert_eq!(
            instructions("client"),
            "Hennepin County will contact you within 7 days about your application."
        );
    }

    #[test]
    fn prepare_fields_rejects_unknown_documents() {
        let parsed: Value = serde_json::from_str(&prepare_fields("", "", "pdf", "client")).expect("json");
        assert_eq!(parsed["error"], "unknown document 'pdf'");
    }

    #[test]
    fn decide_reports_eligibility() {
        let data = application(json!({
            "choosePrograms": { "programs": ["SNAP"] },
            "migrantFarmWorker": { "migrantOrSeasonalFarmWorker": ["false"] },
            "utilityPayments": { "payForUtilities": ["NONE_OF_THE_ABOVE"] },
            "liquidAssets": { "liquidAssets": ["20"] },
            "thirtyDayIncome": { "moneyMadeLast30Days": ["100"] }
        }));
        let parsed: Value = serde_json::from_str(&decide(&data)).expect("json");
        assert_eq!(parsed["eligibility"], "ELIGIBLE");

        let parsed: Value = serde_json::from_str(&decide("{}")).expect("json");
        assert_eq!(parsed["eligibility"], "UNDETERMINED");
    }

    #[test]
    fn decide_surfaces_malformed_money() {
        let data = application(json!({
            "choosePrograms": { "programs": ["SNAP"] },
            "migrantFarmWorker": { "migrantOrSeasonalFarmWorker": ["false"] },
            "utilityPayments": { "payForUtilities": ["PHONE"] },
            "liquidAssets": { "liquidAssets": ["plenty"] }
        }));
        let parsed: Value = serde_json::from_str(&decide(&data)).expect("json");
        assert_eq!(parsed["error"], "eligibility failed: 'plenty' is not a money amount");
    }
}
