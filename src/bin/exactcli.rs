use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sashimi::output::{print_json, report};
use sashimi::query::{self, QueryRequest};
use sashimi::{dataset, env, Error, ExactClient, Result};

#[derive(Parser)]
#[command(name = "exactcli", version, about = "Exact CLI client")]
struct Cli {
    #[arg(
        short,
        long,
        env = "EXACT_URL",
        value_name = "SERVER",
        help_heading = "Target specification",
        help = "Exact server url, e.g. https://exact.www-security.com/"
    )]
    server: Option<String>,

    #[arg(
        short,
        long,
        env = "EXACT_PROJECT",
        value_name = "PROJECTNAME",
        help_heading = "Target specification",
        help = "Project name, e.g. sandbox"
    )]
    project: Option<String>,

    #[arg(
        long,
        env = "EXACT_DSNAME",
        value_name = "DSNAME",
        help_heading = "Target specification",
        help = "Dataset name"
    )]
    ds: Option<String>,

    #[arg(
        long,
        env = "EXACT_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        help_heading = "Target specification",
        help = "Access token"
    )]
    token: Option<String>,

    #[arg(short, long, value_name = "file.json", help_heading = "Upload JSON", help = "File to upload")]
    upload: Option<PathBuf>,

    #[arg(
        long,
        value_name = "KEY",
        num_args = 1..,
        help_heading = "Upload JSON",
        help = "Keypath (if needed)"
    )]
    keypath: Vec<String>,

    #[arg(
        long,
        value_name = "EXPRESSION",
        help_heading = "Query dataset",
        help = "Expression like 'True' or 'id==1' or 'Brand == \"Apple\" and price < 1000'"
    )]
    expr: Option<String>,

    #[arg(
        long,
        value_name = "KEY=VALUE",
        num_args = 0..,
        help_heading = "Query dataset",
        help = "Filters like: brand=\"Apple\" price<1000 price__lt=1000"
    )]
    filter: Vec<String>,

    #[arg(long, value_name = "NUM", help_heading = "Query dataset", help = "Limit")]
    limit: Option<u64>,

    #[arg(long, value_name = "FIELD", help_heading = "Query dataset", help = "Sort by this field")]
    sort: Option<String>,

    #[arg(long, help_heading = "Query dataset", help = "Reverse order for sort")]
    reverse: bool,

    #[arg(
        long,
        value_name = "FIELD",
        num_args = 1..,
        help_heading = "Query dataset",
        help = "Return only these fields"
    )]
    fields: Vec<String>,

    #[arg(long, help_heading = "Other", help = "Get project info from server")]
    info: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode<'a> {
    Upload(&'a Path),
    Info,
    Query,
}

impl Cli {
    fn mode(&self) -> Mode<'_> {
        if let Some(path) = &self.upload {
            Mode::Upload(path)
        } else if self.info {
            Mode::Info
        } else {
            Mode::Query
        }
    }
}

/// Settings every mode needs, resolved from flags and environment.
#[derive(Debug)]
struct Target<'a> {
    server: &'a str,
    project: &'a str,
    token: &'a str,
    ds: Option<&'a str>,
}

fn require<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingSetting(message.to_string()))
}

fn check_arguments<'a>(cli: &'a Cli, mode: Mode<'_>) -> Result<Target<'a>> {
    let server = require(&cli.server, "Need --server (or $EXACT_URL)")?;
    let project = require(&cli.project, "Need --project (or $EXACT_PROJECT)")?;
    let token = require(&cli.token, "Need --token (or $EXACT_TOKEN)")?;
    let ds = match mode {
        Mode::Upload(_) | Mode::Query => Some(require(&cli.ds, "Need --ds (or $EXACT_DSNAME)")?),
        Mode::Info => None,
    };
    Ok(Target {
        server,
        project,
        token,
        ds,
    })
}

fn main() -> ExitCode {
    let dotenv = env::load_dotenv("EXACT_DOTENV");
    env::init_logging("EXACT_LOG");

    if let Err(e) = dotenv {
        report(&e);
        return ExitCode::from(1);
    }

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            report(&e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mode = cli.mode();
    let target = check_arguments(cli, mode)?;
    let client = ExactClient::new(target.server, target.project, Some(target.token.to_string()))?;
    tracing::debug!(project = %client.project_url(), ?mode, "using project");

    let ds = target.ds.unwrap_or_default();
    match mode {
        Mode::Upload(path) => {
            let records = dataset::read_dataset(path, &cli.keypath)?;
            println!("# dataset: {} records", records.len());
            println!("{}", client.put(ds, &records)?);
        }
        Mode::Info => print_json(&client.info()?)?,
        Mode::Query => {
            let filter = query::translate(&cli.filter)?;
            let request = QueryRequest::new(filter, cli.expr.clone())
                .sort(cli.sort.clone())
                .reverse(cli.reverse)
                .limit(cli.limit)
                .fields(cli.fields.clone());
            print_json(&client.query(ds, &request)?)?;
        }
    }
    Ok(())
}
