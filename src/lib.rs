// Library root
// -----------
// This crate exposes the submission engine behind the `tcrun` binary.
// The binary (`main.rs`) only parses arguments and hands a `RunConfig`
// to `ui::run`.
//
// Module responsibilities:
// - `api`: HTTP submission of one test case file to the endpoint.
// - `config`: run options and their defaults.
// - `credentials`: bearer token lookup through `.bearer` / `bearer.txt`.
// - `discovery`: lists the `.xml` / `.tc` files of the test case folder.
// - `error`: typed errors for fatal and per-file failures.
// - `report`: per-file states, run summary and their rendering.
// - `results`: turns the endpoint's XML answer into test outcomes.
// - `ui`: drives a run and writes the terminal output.
pub mod api;
pub mod config;
pub mod credentials;
pub mod discovery;
pub mod error;
pub mod report;
pub mod results;
pub mod ui;

pub use config::{OutputFormat, RunConfig};
pub use ui::run;
