// Run driver: resolves the token, lists the test case files and submits
// them one after the other, writing each file's status as soon as it is
// known. Only a missing token or an unusable folder stop the run; every
// per-file failure ends up in the report.

use crate::api::ApiClient;
use crate::config::{OutputFormat, RunConfig};
use crate::credentials;
use crate::discovery::{self, TestCaseFile};
use crate::error::RunError;
use crate::report::{FileReport, FileState, Printer, RunSummary};
use crate::results;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::io::Write;
use std::time::Duration;

/// Run every test case file of `config.folder` against the endpoint and
/// write the report to `out`.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunSummary> {
    let human = config.format == OutputFormat::Human;
    let printer = Printer::new(config.color);

    if human {
        printer.header(out, &config.folder)?;
    }

    let token = credentials::resolve(config.bearer.as_deref(), &config.folder)
        .ok_or_else(|| RunError::MissingToken(config.folder.clone()))?;
    let files = discovery::list(&config.folder)?;
    let api = ApiClient::new(config, &token)?;
    info!(
        "submitting {} test case files to {}",
        files.len(),
        api.endpoint()
    );

    let mut summary = RunSummary::new(config.folder.clone(), files.len());
    for file in &files {
        let spinner = (human && config.progress).then(|| spinner(&file.name));
        let state = submit_one(&api, file);
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        if human {
            printer.file_prefix(out, &file.name)?;
            printer.state(out, &state)?;
        }
        summary.push(FileReport {
            file: file.name.clone(),
            state,
        });
    }

    if human {
        printer.footer(out, &summary)?;
    } else {
        let json = summary.to_json().context("Failed to serialize run report")?;
        writeln!(out, "{}", json)?;
    }
    Ok(summary)
}

/// Submit one file and interpret the answer. Never fails: every error is
/// folded into the returned state.
pub fn submit_one(api: &ApiClient, file: &TestCaseFile) -> FileState {
    let result = api
        .submit(file)
        .and_then(|body| results::parse(&body).map_err(Into::into));
    if let Err(e) = &result {
        debug!("{}: {}", file.name, e);
    }
    FileState::from_result(result)
}

/// `indicatif` spinner on stderr while a request is in flight.
fn spinner(name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Submitting {}...", name));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
