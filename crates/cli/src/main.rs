//! s3upload - upload local files to an S3 bucket
//!
//! Credentials come from `-a`/`-s` or a properties file given with `-k`.

use s3upload_cli::commands::{self, Invocation};
use s3upload_cli::exit_code::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log filter used by --debug: our crates at debug, the SDK stays quiet
const DEBUG_FILTER: &str = "warn,s3upload_cli=debug,s3upload_core=debug,s3upload_s3=debug";

#[tokio::main]
async fn main() {
    let cli = match commands::parse_args(std::env::args_os()) {
        Ok(Invocation::Run(cli)) => cli,
        Ok(Invocation::Help) => {
            println!("{}", commands::help_text());
            std::process::exit(ExitCode::Success.as_i32());
        }
        Err(e) => std::process::exit(commands::report_parse_error(&e).as_i32()),
    };

    // Initialize tracing subscriber for logging
    let filter = if cli.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
