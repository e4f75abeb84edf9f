//! CLI definition and execution
//!
//! Parses the command line, validates it, and maps the outcome of an upload
//! run to an exit code. Nothing below `main` terminates the process.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use s3upload_core::{ClientOptions, Config, ConfigManager, CredentialSource, Error, Result};
use s3upload_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

pub mod upload;

use upload::{UploadPlan, UploadSummary};

const CREDS_FILE_HELP: &str = "\
Format of the credentials file given with -k:
    AWSAccessKeyId=XXX
    AWSSecretKey=XXX";

/// s3upload - upload files to an S3 bucket
///
/// Each file is stored in the bucket under its base name.
#[derive(Parser, Debug)]
#[command(name = "s3upload")]
#[command(author, version, about, long_about = None)]
#[command(after_help = CREDS_FILE_HELP)]
pub struct Cli {
    /// AWS access key (not needed when -k is used)
    #[arg(short = 'a', long = "accesskey", value_name = "KEY")]
    pub access_key: Option<String>,

    /// AWS secret key (not needed when -k is used)
    #[arg(short = 's', long = "secretkey", value_name = "KEY")]
    pub secret_key: Option<String>,

    /// Java properties file with AWS credentials
    #[arg(short = 'k', long = "aws-creds-file", value_name = "PATH")]
    pub creds_file: Option<PathBuf>,

    /// Destination S3 bucket name
    #[arg(short, long, value_name = "NAME")]
    pub bucket: String,

    /// AWS region [default: us-east-1]
    #[arg(long, env = "AWS_REGION", value_name = "REGION")]
    pub region: Option<String>,

    /// Endpoint URL for S3-compatible services
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long, default_value = "false")]
    pub path_style: bool,

    /// Content type for uploaded files (guessed from the extension by default)
    #[arg(long, value_name = "MIME")]
    pub content_type: Option<String>,

    /// Output format: human-readable or JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Files to upload
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// What the command line asks for
#[derive(Debug)]
pub enum Invocation {
    /// Print help and exit successfully
    Help,
    /// Upload files
    Run(Cli),
}

/// Parse raw arguments (including the program name).
///
/// `-h`/`--help` wins over everything else on the line, even arguments
/// that would otherwise fail to parse.
pub fn parse_args<I, T>(args: I) -> std::result::Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if requests_help(&args) {
        return Ok(Invocation::Help);
    }

    Cli::try_parse_from(args).map(Invocation::Run)
}

fn requests_help(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .take_while(|arg| arg.as_os_str() != "--")
        .any(|arg| arg.as_os_str() == "-h" || arg.as_os_str() == "--help")
}

/// Full help text
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

/// One-line usage text
pub fn usage_text() -> String {
    format!(
        "{}\n\nFor more information, try '--help'.",
        Cli::command().render_usage()
    )
}

/// Print a clap parse error and return the matching exit code
pub fn report_parse_error(err: &clap::Error) -> ExitCode {
    // Help and version go to stdout, everything else to stderr
    let _ = err.print();
    parse_error_exit_code(err.kind())
}

/// Exit code for a clap error kind
pub fn parse_error_exit_code(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
        _ => ExitCode::UsageError,
    }
}

/// Execute an upload run and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let mut output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    let (source, plan) = match upload::validate(&cli) {
        Ok(validated) => validated,
        Err(e) => return fail(&Formatter::new(output_config), &e),
    };

    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(e) => return fail(&Formatter::new(output_config), &e),
    };

    output_config.apply_defaults(&config.defaults);
    let formatter = Formatter::new(output_config);

    match run(&cli, &config, source, &plan, &formatter).await {
        Ok(summary) => {
            upload::report(&summary, &formatter);
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}

async fn run(
    cli: &Cli,
    config: &Config,
    source: CredentialSource,
    plan: &UploadPlan,
    formatter: &Formatter,
) -> Result<UploadSummary> {
    let credentials = source.resolve()?;

    let options = ClientOptions::resolve(
        cli.region.as_deref(),
        cli.endpoint_url.as_deref(),
        cli.path_style,
        &config.defaults,
    )?;

    let client = S3Client::new(credentials, &options).await?;

    upload::upload_files(&client, plan, formatter).await
}

fn fail(formatter: &Formatter, err: &Error) -> ExitCode {
    let code = ExitCode::from(err);
    tracing::debug!("Run failed with {code}: {err:?}");
    formatter.error(&err.to_string());
    if err.is_usage() {
        formatter.usage(&usage_text());
    }
    code
}
