use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "preflight",
    about = "preflight — deployment readiness evaluator",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every service in a manifest once and emit a readiness report.
    ///
    /// The manifest is read as JSON when its extension is .json, and as
    /// TOML otherwise. Only `deployment.services` is consulted.
    Check {
        /// Path to the deployment manifest.
        #[arg(short, long, default_value = "deployment.toml")]
        manifest: String,
        /// Write the JSON report to this file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
        /// Output format on stdout.
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Per-probe timeout (e.g. "5s", "500ms"). Overrides the manifest.
        #[arg(short, long)]
        timeout: Option<String>,
        /// Exit with status 2 unless the deployment is fully healthy.
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so the report on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("preflight=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            manifest,
            output,
            format,
            timeout,
            strict,
        } => {
            let opts = commands::check::CheckOptions {
                manifest: manifest.into(),
                output: output.map(Into::into),
                text: format == Format::Text,
                timeout,
                strict,
            };
            commands::check::check(&opts).await.map(ExitCode::from)
        }
    }
}
