// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments into a `RunConfig` and hand it to
//   `ui::run`.
// - Fatal run errors exit with status 1; test failures do not change the
//   exit status.

use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tcrun_cli::{OutputFormat, RunConfig};

#[derive(Parser)]
#[command(name = "tcrun")]
#[command(version)]
#[command(about = "Submit test case files to a remote test endpoint and report the results", long_about = None)]
struct Cli {
    /// Test endpoint URL receiving each test case file
    #[arg(value_parser = parse_endpoint)]
    endpoint: String,

    /// Folder containing test case files (.xml / .tc)
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// Bearer token to use for authorization (default: .bearer or bearer.txt in the folder or a parent)
    #[arg(short, long)]
    bearer: Option<String>,

    /// Connect timeout in seconds
    #[arg(long, env = "TCRUN_CONNECT_TIMEOUT", default_value = "30")]
    connect_timeout: u64,

    /// Read timeout in seconds
    #[arg(long, env = "TCRUN_READ_TIMEOUT", default_value = "30")]
    read_timeout: u64,

    /// Report format
    #[arg(long, value_enum, default_value = "human")]
    format: Format,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    no_color: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
}

fn parse_endpoint(value: &str) -> Result<String, String> {
    reqwest::Url::parse(value)
        .map(|_| value.to_string())
        .map_err(|e| format!("invalid endpoint URL: {}", e))
}

impl Cli {
    fn into_config(self) -> anyhow::Result<RunConfig> {
        let folder = match self.folder {
            Some(folder) => folder,
            None => std::env::current_dir()?,
        };
        let color = !self.no_color && std::env::var_os("NO_COLOR").is_none();
        Ok(RunConfig {
            endpoint: self.endpoint,
            folder,
            bearer: self.bearer,
            connect_timeout: Duration::from_secs(self.connect_timeout),
            read_timeout: Duration::from_secs(self.read_timeout),
            format: match self.format {
                Format::Human => OutputFormat::Human,
                Format::Json => OutputFormat::Json,
            },
            color,
            progress: true,
        })
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = cli
        .into_config()
        .and_then(|config| tcrun_cli::run(&config, &mut std::io::stdout().lock()));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("{:#}", e).red());
            ExitCode::FAILURE
        }
    }
}
