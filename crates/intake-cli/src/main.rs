mod logging;

use clap::{Parser, Subcommand};
use component_intake::{
    decide as component_decide, evaluate_condition, next_page, prepare_fields, should_skip,
};
use intake_spec::{ConfigValidation, PagesConfig, validate_config};
use logging::{LogConfig, init_logging};
use serde_json::{Value, json};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const CONFIG_ENV: &str = "INTAKE_CONFIG";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Intake page-flow and document-field CLI",
    long_about = "Walks intake page flows, prepares document fields and decides expedited eligibility from saved application data"
)]
struct Cli {
    /// Flow configuration JSON (defaults to INTAKE_CONFIG, then the bundled flow).
    #[arg(long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a flow configuration for broken links and unknown references.
    Validate,
    /// Print the JSON Schema of the flow configuration.
    Schema,
    /// Report whether a page is passed over for the given answers.
    Skip {
        /// Page to check.
        #[arg(long)]
        page: String,
        /// Application data JSON.
        #[arg(long, value_name = "DATA")]
        data: PathBuf,
        /// Identifier of the repeated-group iteration in progress.
        #[arg(long, value_name = "ID")]
        iteration: Option<String>,
    },
    /// Resolve the page the user lands on after leaving a page.
    Navigate {
        /// Page being left.
        #[arg(long)]
        from: String,
        /// Application data JSON.
        #[arg(long, value_name = "DATA")]
        data: PathBuf,
        /// Move to the previous page instead of the next one.
        #[arg(long)]
        back: bool,
        /// Identifier of the repeated-group iteration in progress.
        #[arg(long, value_name = "ID")]
        iteration: Option<String>,
    },
    /// Evaluate a condition JSON file against application data.
    Eval {
        #[arg(long, value_name = "CONDITION")]
        condition: PathBuf,
        #[arg(long, value_name = "DATA")]
        data: PathBuf,
    },
    /// Prepare the flat document fields for a document and recipient.
    Fields {
        #[arg(long, value_name = "DATA")]
        data: PathBuf,
        /// caf, certain-pops or ccap.
        #[arg(long, default_value = "caf")]
        document: String,
        /// client or caseworker.
        #[arg(long, default_value = "client")]
        recipient: String,
    },
    /// Decide expedited food-support eligibility.
    Decide {
        #[arg(long, value_name = "DATA")]
        data: PathBuf,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose));

    let config_path = resolve_config_path(cli.config);
    match cli.command {
        Command::Validate => run_validate(config_path.as_deref()),
        Command::Schema => run_schema(),
        Command::Skip {
            page,
            data,
            iteration,
        } => {
            let ctx = context(false, iteration);
            print_response(should_skip(
                &component_config(config_path.as_deref())?,
                &page,
                &read(&data)?,
                &ctx,
            ))
        }
        Command::Navigate {
            from,
            data,
            back,
            iteration,
        } => {
            let ctx = context(back, iteration);
            print_response(next_page(
                &component_config(config_path.as_deref())?,
                &from,
                &read(&data)?,
                &ctx,
            ))
        }
        Command::Eval { condition, data } => {
            print_response(evaluate_condition(&read(&condition)?, &read(&data)?))
        }
        Command::Fields {
            data,
            document,
            recipient,
        } => print_response(prepare_fields(
            &component_config(config_path.as_deref())?,
            &read(&data)?,
            &document,
            &recipient,
        )),
        Command::Decide { data } => print_response(component_decide(&read(&data)?)),
    }
}

fn resolve_config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| {
        env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

fn read(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read {}: {}", path.display(), err).into())
}

/// Component configuration: the flow file wrapped for the component, or empty for the bundled flow.
fn component_config(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading flow configuration");
            Ok(json!({ "flow_json": read(path)? }).to_string())
        }
        None => Ok(String::new()),
    }
}

fn context(back: bool, iteration: Option<String>) -> String {
    let mut ctx = json!({ "backwards": back });
    if let Some(id) = iteration {
        ctx["iteration_id"] = Value::String(id);
    }
    ctx.to_string()
}

fn print_response(payload: String) -> CliResult<()> {
    let value: Value = serde_json::from_str(&payload)?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Err(error.to_string().into());
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn run_validate(config_path: Option<&Path>) -> CliResult<()> {
    let flow: PagesConfig = match config_path {
        Some(path) => serde_json::from_str(&read(path)?)?,
        None => serde_json::from_str(include_str!(
            "../../intake-spec/tests/fixtures/intake_flow.json"
        ))?,
    };

    let result = validate_config(&flow);
    println!(
        "Validation result: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if result.valid {
        Ok(())
    } else {
        Err("configuration is invalid".into())
    }
}

fn describe_validation(result: &ConfigValidation) {
    if result.issues.is_empty() {
        return;
    }
    println!("Issues:");
    for issue in &result.issues {
        println!(
            "  [{}] {} - {}",
            issue.code,
            issue.path.as_deref().unwrap_or("<unknown>"),
            issue.message
        );
    }
}

fn run_schema() -> CliResult<()> {
    let schema = schemars::schema_for!(PagesConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
