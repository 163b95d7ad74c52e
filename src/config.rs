use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default for both the connect and the read timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the run is reported on stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One status line per file, colored.
    #[default]
    Human,
    /// A single JSON document once every file is processed.
    Json,
}

/// Everything a run needs, already resolved from the command line.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Test endpoint receiving each test case file.
    pub endpoint: String,

    /// Folder holding the `.xml` / `.tc` test case files.
    pub folder: PathBuf,

    /// Explicit bearer token; when absent the folder's ancestors are searched.
    pub bearer: Option<String>,

    /// Limit for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,

    /// Limit for a whole request, from sending the body to reading the
    /// last byte of the answer (reqwest's client `timeout`).
    pub read_timeout: Duration,

    /// Human status lines or a single JSON document.
    pub format: OutputFormat,

    /// Emit ANSI colors in the human format.
    pub color: bool,

    /// Show a spinner on stderr while a request is in flight.
    pub progress: bool,
}

impl RunConfig {
    pub fn new(endpoint: impl Into<String>, folder: impl Into<PathBuf>) -> Self {
        Self {
            endpoint: endpoint.into(),
            folder: folder.into(),
            ..Self::default()
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            folder: PathBuf::from("."),
            bearer: None,
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            format: OutputFormat::Human,
            color: true,
            progress: true,
        }
    }
}
