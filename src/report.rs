// Aggregation and rendering. Each file ends in exactly one `FileState`;
// the run summary collects them in submission order.

use crate::error::{invalid_status_line, FileError};
use crate::results::SubmissionResult;
use crossterm::style::{Color, Stylize};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Final state of one submitted file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    /// The endpoint answered with zero test cases.
    NoTestsFound,
    AllPassed {
        passed: usize,
        total: usize,
    },
    SomeFailed {
        passed: usize,
        total: usize,
        failing: Vec<String>,
    },
    /// The endpoint answered with a status other than 200.
    InvalidResponse {
        status: u16,
        message: String,
    },
    /// Transport failure, unreadable file or unparsable response.
    SubmissionError {
        message: String,
    },
}

impl FileState {
    pub fn from_result(result: Result<SubmissionResult, FileError>) -> Self {
        match result {
            Ok(result) => Self::from_submission(&result),
            Err(FileError::InvalidStatus { status, message }) => {
                FileState::InvalidResponse { status, message }
            }
            Err(e) => FileState::SubmissionError {
                message: e.to_string(),
            },
        }
    }

    pub fn from_submission(result: &SubmissionResult) -> Self {
        let total = result.total();
        let passed = result.passed_count();
        if total == 0 {
            FileState::NoTestsFound
        } else if passed == total {
            FileState::AllPassed { passed, total }
        } else {
            FileState::SomeFailed {
                passed,
                total,
                failing: result.failing(),
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub state: FileState,
}

/// How many files ended in each state, plus test totals across files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub no_tests_found: usize,
    pub all_passed: usize,
    pub some_failed: usize,
    pub invalid_response: usize,
    pub submission_error: usize,
    pub tests_total: usize,
    pub tests_passed: usize,
}

/// Everything reported once the run is over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub folder: PathBuf,
    pub discovered: usize,
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn new(folder: PathBuf, discovered: usize) -> Self {
        Self {
            folder,
            discovered,
            files: Vec::with_capacity(discovered),
        }
    }

    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    pub fn processed(&self) -> usize {
        self.files.len()
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for report in &self.files {
            match &report.state {
                FileState::NoTestsFound => tally.no_tests_found += 1,
                FileState::AllPassed { passed, total } => {
                    tally.all_passed += 1;
                    tally.tests_passed += passed;
                    tally.tests_total += total;
                }
                FileState::SomeFailed { passed, total, .. } => {
                    tally.some_failed += 1;
                    tally.tests_passed += passed;
                    tally.tests_total += total;
                }
                FileState::InvalidResponse { .. } => tally.invalid_response += 1,
                FileState::SubmissionError { .. } => tally.submission_error += 1,
            }
        }
        tally
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct JsonReport<'a> {
            #[serde(flatten)]
            summary: &'a RunSummary,
            processed: usize,
            tally: Tally,
        }

        serde_json::to_string_pretty(&JsonReport {
            summary: self,
            processed: self.processed(),
            tally: self.tally(),
        })
    }
}

/// Writes the human format, with or without ANSI colors.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn header<W: Write>(&self, out: &mut W, folder: &std::path::Path) -> io::Result<()> {
        writeln!(
            out,
            "{}",
            self.paint(&format!("Using test case folder: {}", folder.display()), Color::White)
        )?;
        writeln!(out)
    }

    /// The `<file>: ` prefix of a status line.
    pub fn file_prefix<W: Write>(&self, out: &mut W, file: &str) -> io::Result<()> {
        write!(out, "{}", self.paint(&format!("{}: ", file), Color::White))?;
        out.flush()
    }

    /// Status of one file, completing the line started by `file_prefix`.
    pub fn state<W: Write>(&self, out: &mut W, state: &FileState) -> io::Result<()> {
        match state {
            FileState::NoTestsFound => {
                writeln!(out, "[{}]", self.paint("NO TESTS FOUND", Color::Yellow))
            }
            FileState::AllPassed { passed, total } => writeln!(
                out,
                "[{}]",
                self.paint(&format!("PASSED {}/{}", passed, total), Color::Green)
            ),
            FileState::SomeFailed {
                passed,
                total,
                failing,
            } => {
                writeln!(
                    out,
                    "[{}]",
                    self.paint(&format!("FAILED {}/{}", passed, total), Color::Red)
                )?;
                writeln!(out, "{}", self.paint("FAILED :", Color::Red))?;
                for identifier in failing {
                    writeln!(out, "{}", self.paint(identifier, Color::Red))?;
                }
                Ok(())
            }
            FileState::InvalidResponse { status, message } => writeln!(
                out,
                "{}",
                self.paint(&invalid_status_line(*status, message), Color::Red)
            ),
            FileState::SubmissionError { message } => writeln!(
                out,
                "[{}] {}",
                self.paint("EXCEPTION", Color::Red),
                message
            ),
        }
    }

    pub fn footer<W: Write>(&self, out: &mut W, summary: &RunSummary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            self.paint(
                &format!("Completed {} test case files.", summary.discovered),
                Color::White
            )
        )
    }
}
